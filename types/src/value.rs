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

/// The shading-language data type of a varying, uniform or attribute entry.
///
/// Front-end type checking is out of scope for the linker; this enum only
/// needs to support the equality checks the cross-stage merge passes run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DataType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    UInt,
    UVec2,
    UVec3,
    UVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DArray,
    SamplerCubeArray,
    Sampler2DShadow,
    SamplerCubeShadow,
}

impl DataType {
    /// Number of 4-float registers a value of this type occupies when placed
    /// in a varying/attribute slot. Matrices occupy one register per column.
    pub fn register_span(self) -> u32 {
        match self {
            DataType::Mat2 => 2,
            DataType::Mat3 => 3,
            DataType::Mat4 => 4,
            _ => 1,
        }
    }

    pub fn is_sampler(self) -> bool {
        matches!(
            self,
            DataType::Sampler1D
                | DataType::Sampler2D
                | DataType::Sampler3D
                | DataType::SamplerCube
                | DataType::Sampler2DArray
                | DataType::SamplerCubeArray
                | DataType::Sampler2DShadow
                | DataType::SamplerCubeShadow
        )
    }

    pub fn is_shadow_sampler(self) -> bool {
        matches!(self, DataType::Sampler2DShadow | DataType::SamplerCubeShadow)
    }
}
