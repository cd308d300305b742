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

use std::fmt;

/// One pipeline phase. Ordered vertex < geometry < fragment so that
/// `BTreeMap<StageKind, _>` iterates stages in pipeline order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum StageKind {
    Vertex,
    Geometry,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => write!(f, "vertex"),
            StageKind::Geometry => write!(f, "geometry"),
            StageKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// Input/output primitive types the geometry stage can be configured with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PrimitiveType {
    Points,
    Lines,
    LinesAdjacency,
    Triangles,
    TrianglesAdjacency,
    TriangleStrip,
}

impl PrimitiveType {
    /// `gl_VerticesIn`: the number of vertices the geometry stage sees per
    /// input primitive, per §4.1 of the linker design.
    pub fn vertices_in(self) -> u32 {
        match self {
            PrimitiveType::Points => 1,
            PrimitiveType::Lines => 2,
            PrimitiveType::Triangles => 3,
            PrimitiveType::LinesAdjacency => 4,
            PrimitiveType::TrianglesAdjacency => 6,
            PrimitiveType::TriangleStrip => 3,
        }
    }
}

/// Transform-feedback capture mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransformFeedbackMode {
    Interleaved,
    Separate,
}

/// The API profile the program is linked against.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ApiProfile {
    Core,
    Compatibility,
    /// Strict ES profile: both vertex and fragment stages are mandatory.
    Es,
}
