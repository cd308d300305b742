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

use shaderlink_types::{ApiProfile, CompiledUnit, StageKind, StageProgram};

use crate::error::LinkResult;

/// Constants owned by the enclosing graphics context, read-mostly
/// configuration the linker never mutates (§5).
#[derive(Clone, Debug)]
pub struct LinkContext {
    pub max_varying: u32,
    pub max_texture_image_units: u32,
    pub max_vertex_generic_attribs: u32,
    pub max_draw_buffers: u32,
    pub max_transform_feedback_interleaved_components: u32,
    pub max_transform_feedback_separate_components: u32,
    pub max_texture_coord_units: u32,
    pub profile: ApiProfile,
}

impl Default for LinkContext {
    /// OpenGL-ES2-class limits; callers targeting a richer profile should
    /// override these from their own context before linking.
    fn default() -> LinkContext {
        LinkContext {
            max_varying: 32,
            max_texture_image_units: 16,
            max_vertex_generic_attribs: 16,
            max_draw_buffers: 8,
            max_transform_feedback_interleaved_components: 64,
            max_transform_feedback_separate_components: 4 * 32,
            max_texture_coord_units: 8,
            profile: ApiProfile::Core,
        }
    }
}

/// The compiler front-end collaborator consumed by main-shader
/// concatenation (§4.1). Lexing, parsing and code generation are out of
/// scope for the linker; this is the seam it calls through. The returned
/// unit's `defines_main` / `has_unresolved_refs` flags are what let the
/// caller decide whether concatenation actually resolved the program.
pub trait ExternalCompiler {
    fn compile(&self, stage: StageKind, source: &str) -> LinkResult<CompiledUnit>;
}

/// The driver callback consumed by the NOTIFY step (§4.7). Returning
/// `false` fails linking with `LinkError::DriverRejected` unless a more
/// specific diagnostic was already recorded.
pub trait DriverNotify {
    fn notify(&mut self, stage: StageKind, program: &StageProgram) -> bool;
}

/// A `DriverNotify` that accepts every stage; used by callers (and tests)
/// with no real backend to finalize against.
#[derive(Default)]
pub struct AcceptAllDriver;

impl DriverNotify for AcceptAllDriver {
    fn notify(&mut self, _stage: StageKind, _program: &StageProgram) -> bool {
        true
    }
}
