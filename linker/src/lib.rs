// Copyright (c) 2021, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Links independently-compiled vertex/geometry/fragment stage programs
//! into one [`ShaderProgram`](shaderlink_types::ShaderProgram): merging
//! varying, uniform, sampler and attribute symbol tables, rewriting
//! instruction operands to the merged storage they resolve to, and
//! recomputing the per-stage bitmasks a driver needs to bind a program.
//!
//! Lexing, parsing and code generation are out of scope; [`ExternalCompiler`]
//! is the seam this crate calls through when a stage has no self-contained
//! compiled unit and its translation units must be concatenated first.
//! Texture and uniform-value binding, and persisting a linked program, are
//! likewise the host's job, not this crate's.

mod attribute_resolve;
mod bases;
mod context;
mod error;
mod metadata;
mod orchestrator;
mod select_main;
mod uniform_merge;
mod validate;
mod varying_merge;

pub use context::{AcceptAllDriver, DriverNotify, ExternalCompiler, LinkContext};
pub use error::{LinkError, LinkResult};
pub use orchestrator::link;
