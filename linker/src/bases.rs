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

//! Per-stage, per-direction base register indices.
//!
//! §9 calls out that "the per-stage base index for varyings, attributes,
//! and results should be a table keyed by stage and direction, not
//! scattered conditionals" — this module is that table.

use shaderlink_types::{OperandFile, ShaderProgram, StageKind};

/// Built-in vertex outputs occupy registers `[0, FIRST_VERTEX_RESULT_VARYING)`
/// (position, point size, clip distance, ...); user varyings written by the
/// vertex stage start immediately after.
pub const FIRST_VERTEX_RESULT_VARYING: i32 = 8;

/// Built-in fragment inputs (fragment coordinate, point coordinate, front
/// facing, ...) occupy `[0, FIRST_FRAGMENT_VARYING)`.
pub const FIRST_FRAGMENT_VARYING: i32 = 1;

/// The geometry stage reads its per-vertex varying inputs starting here.
pub const GEOMETRY_VARYING_INPUT_BASE: i32 = 0;

/// The geometry stage writes its varying outputs starting here.
pub const GEOMETRY_VARYING_OUTPUT_BASE: i32 = 8;

/// Register 0 is the built-in vertex position input; generic attributes
/// start immediately after.
pub const FIRST_GENERIC_ATTRIBUTE: i32 = 1;

/// Fragment register holding the scalar (non-MRT) colour output.
pub const FRAGMENT_COLOR_OUTPUT: i32 = 0;

/// Fragment indexed draw-buffer outputs start here.
pub const FIRST_FRAGMENT_DATA_OUTPUT: i32 = 1;

/// The file/base-register a stage uses to read or write its varyings,
/// keyed by (stage, direction) as recommended by §9.
#[derive(Copy, Clone, Debug)]
pub struct VaryingBase {
    pub writes: bool,
    pub reads: bool,
    pub write_base: i32,
    pub read_base: i32,
}

pub fn varying_base(stage: StageKind) -> VaryingBase {
    match stage {
        StageKind::Vertex => VaryingBase {
            writes: true,
            reads: false,
            write_base: FIRST_VERTEX_RESULT_VARYING,
            read_base: 0,
        },
        StageKind::Fragment => VaryingBase {
            writes: false,
            reads: true,
            write_base: 0,
            read_base: FIRST_FRAGMENT_VARYING,
        },
        StageKind::Geometry => VaryingBase {
            writes: true,
            reads: true,
            write_base: GEOMETRY_VARYING_OUTPUT_BASE,
            read_base: GEOMETRY_VARYING_INPUT_BASE,
        },
    }
}

/// Which addressable register array a relatively-addressed operand's
/// compile-time base falls into (§4.5/§6). A relative-addressing expansion
/// stays inside this array rather than always reaching the end of the
/// register file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelativeAddressBase {
    /// A single built-in scalar register, not an array. Indexing it
    /// relatively can't be bounded any tighter than the rest of the file.
    Scalar,
    /// The varying array, `MaxVarying` consecutive slots from the base.
    /// Fixed-function texture-coordinate inputs have no register bank of
    /// their own in this model and fall under this case too: §4.2 names the
    /// fragment stage's read base "the first fragment-attrib-varying index",
    /// so a relatively-addressed fragment input is a varying reference.
    Varying,
    /// The indexed fragment draw-buffer outputs, `MaxDrawBuffers`
    /// consecutive slots from the base.
    DrawBuffer,
    /// Vertex generic attributes: unbounded, reaching to the end of the
    /// register file from the base, per §4.5's wording for this case.
    GenericAttribute,
}

/// Classifies a relatively-addressed operand's base register, keyed by
/// (stage, file, index) as recommended by §9.
pub fn relative_address_base(stage: StageKind, file: OperandFile, index: i32) -> (RelativeAddressBase, i32) {
    match (file, stage) {
        (OperandFile::Input, StageKind::Vertex) => {
            if index >= FIRST_GENERIC_ATTRIBUTE {
                (RelativeAddressBase::GenericAttribute, FIRST_GENERIC_ATTRIBUTE)
            } else {
                (RelativeAddressBase::Scalar, 0)
            }
        }
        (OperandFile::Input, StageKind::Fragment) => {
            if index >= FIRST_FRAGMENT_VARYING {
                (RelativeAddressBase::Varying, FIRST_FRAGMENT_VARYING)
            } else {
                (RelativeAddressBase::Scalar, 0)
            }
        }
        (OperandFile::Input, StageKind::Geometry) => (RelativeAddressBase::Varying, GEOMETRY_VARYING_INPUT_BASE),
        (OperandFile::Output, StageKind::Vertex) => {
            if index >= FIRST_VERTEX_RESULT_VARYING {
                (RelativeAddressBase::Varying, FIRST_VERTEX_RESULT_VARYING)
            } else {
                (RelativeAddressBase::Scalar, 0)
            }
        }
        (OperandFile::Output, StageKind::Geometry) => {
            if index >= GEOMETRY_VARYING_OUTPUT_BASE {
                (RelativeAddressBase::Varying, GEOMETRY_VARYING_OUTPUT_BASE)
            } else {
                (RelativeAddressBase::Scalar, 0)
            }
        }
        (OperandFile::Output, StageKind::Fragment) => {
            if index >= FIRST_FRAGMENT_DATA_OUTPUT {
                (RelativeAddressBase::DrawBuffer, FIRST_FRAGMENT_DATA_OUTPUT)
            } else {
                (RelativeAddressBase::Scalar, FRAGMENT_COLOR_OUTPUT)
            }
        }
        _ => (RelativeAddressBase::Scalar, 0),
    }
}

/// The stages that have at least one cloned program for this link attempt,
/// in pipeline order. Every merge pass walks stages in this order so
/// sampler/attribute assignment stays deterministic.
pub fn present_stages(program: &ShaderProgram) -> Vec<StageKind> {
    [StageKind::Vertex, StageKind::Geometry, StageKind::Fragment]
        .into_iter()
        .filter(|s| program.linked_program(*s).is_some())
        .collect()
}
