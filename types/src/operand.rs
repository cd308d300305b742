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

/// The register-bank selector on an instruction operand.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum OperandFile {
    Input,
    Output,
    Temporary,
    /// Pre-link only: resolved to `Input` or `Output` by the varying merger.
    Varying,
    Uniform,
    Sampler,
    State,
    Address,
    Constant,
}

/// One texture sampling target.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TextureTarget {
    Tex1D,
    Tex2D,
    Tex3D,
    TexCube,
    Tex2DArray,
    TexCubeArray,
    TexRect,
}

/// Extra payload carried only by texture instructions.
#[derive(Copy, Clone, Debug)]
pub struct TextureInfo {
    pub sampler_unit: u32,
    pub target: TextureTarget,
    pub shadow: bool,
}

/// One operand of an instruction: a file tag, an index into that file, an
/// optional secondary index (geometry per-vertex arrays), and independent
/// relative-addressing flags for each index.
#[derive(Copy, Clone, Debug)]
pub struct Operand {
    pub file: OperandFile,
    pub index: i32,
    pub index2: Option<i32>,
    pub rel_addr: bool,
    pub rel_addr2: bool,
}

impl Operand {
    pub fn new(file: OperandFile, index: i32) -> Operand {
        Operand {
            file,
            index,
            index2: None,
            rel_addr: false,
            rel_addr2: false,
        }
    }

    pub fn with_rel_addr(mut self, rel_addr: bool) -> Operand {
        self.rel_addr = rel_addr;
        self
    }

    pub fn with_index2(mut self, index2: i32) -> Operand {
        self.index2 = Some(index2);
        self
    }
}
