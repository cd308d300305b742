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

//! Data model for linked shader programs.
//!
//! This crate only holds types: stages, instructions, operands, and the
//! program-wide symbol tables a linker builds. See `shaderlink` for the
//! passes that populate them.

mod attribute;
mod instruction;
mod mask;
mod operand;
mod param;
mod program;
mod shader_program;
mod stage;
mod uniform;
mod unit;
mod value;
mod varying;

pub use attribute::{AttributeEntry, AttributeParam, AttributeTable};
pub use instruction::{Instruction, Opcode};
pub use mask::{Mask32, Mask64};
pub use operand::{Operand, OperandFile, TextureInfo, TextureTarget};
pub use param::{Parameter, ParameterKind, VaryingFlags};
pub use program::StageProgram;
pub use shader_program::{GeometryConfig, ShaderProgram, TransformFeedbackConfig};
pub use stage::{ApiProfile, PrimitiveType, StageKind, TransformFeedbackMode};
pub use uniform::{UniformEntry, UniformTable};
pub use unit::CompiledUnit;
pub use value::DataType;
pub use varying::{VaryingEntry, VaryingTable};
