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

use crate::operand::{Operand, TextureInfo};

/// A representative register-machine opcode set. Code generation is out of
/// scope for the linker; this only needs to be rich enough to tell texture
/// instructions (which carry a [`TextureInfo`]) apart from everything else.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    Nop,
    Mov,
    Add,
    Sub,
    Mul,
    Mad,
    Dp3,
    Dp4,
    Min,
    Max,
    Slt,
    Sge,
    Rsq,
    Rcp,
    Frc,
    Flr,
    Lrp,
    Pow,
    Nrm,
    Sin,
    Cos,
    Cmp,
    Kil,
    Tex,
    TexB,
    TexKill,
}

impl Opcode {
    pub fn is_texture(self) -> bool {
        matches!(self, Opcode::Tex | Opcode::TexB | Opcode::TexKill)
    }
}

/// One instruction in a stage's register-based instruction stream.
#[derive(Clone, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub dst: Operand,
    pub src: [Option<Operand>; 3],
    pub texture: Option<TextureInfo>,
}

impl Instruction {
    pub fn new(opcode: Opcode, dst: Operand) -> Instruction {
        Instruction {
            opcode,
            dst,
            src: [None, None, None],
            texture: None,
        }
    }

    pub fn with_src(mut self, slot: usize, operand: Operand) -> Instruction {
        self.src[slot] = Some(operand);
        self
    }

    pub fn with_texture(mut self, texture: TextureInfo) -> Instruction {
        self.texture = Some(texture);
        self
    }

    /// Iterates over every operand in the instruction: destination first,
    /// then the populated source slots.
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        std::iter::once(&self.dst).chain(self.src.iter().filter_map(|o| o.as_ref()))
    }

    pub fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        std::iter::once(&mut self.dst).chain(self.src.iter_mut().filter_map(|o| o.as_mut()))
    }
}
