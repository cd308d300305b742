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

use crate::attribute::AttributeParam;
use crate::instruction::Instruction;
use crate::mask::{Mask32, Mask64};
use crate::param::{Parameter, VaryingFlags};
use crate::stage::StageKind;
use crate::operand::TextureTarget;

/// One compiled stage's linkable program: an instruction stream, a
/// parameter list, and (vertex only) an attribute list, plus the derived
/// scalars recomputed by the linker.
#[derive(Clone, Debug)]
pub struct StageProgram {
    pub stage: StageKind,
    pub instructions: Vec<Instruction>,
    pub parameters: Vec<Parameter>,
    /// Vertex stage only; empty for geometry/fragment.
    pub attributes: Vec<AttributeParam>,

    pub inputs_read: Mask32,
    pub outputs_written: Mask64,
    pub num_temporaries: u32,
    pub num_address_regs: u32,
    pub samplers_used: Mask32,
    pub shadow_samplers: Mask32,
    /// Indexed by program-wide sampler unit.
    pub sampler_targets: Vec<Option<TextureTarget>>,

    /// Per-register flag bits for rewritten varying operands, keyed by
    /// `(is_output, register_index)`. Populated by the varying merger so
    /// that downstream consumers can recover centroid/invariant bits from
    /// a rewritten INPUT/OUTPUT index.
    input_flags: Vec<Option<VaryingFlags>>,
    output_flags: Vec<Option<VaryingFlags>>,
}

impl StageProgram {
    pub fn new(stage: StageKind) -> StageProgram {
        StageProgram {
            stage,
            instructions: Vec::new(),
            parameters: Vec::new(),
            attributes: Vec::new(),
            inputs_read: Mask32::ZERO,
            outputs_written: Mask64::ZERO,
            num_temporaries: 0,
            num_address_regs: 0,
            samplers_used: Mask32::ZERO,
            shadow_samplers: Mask32::ZERO,
            sampler_targets: Vec::new(),
            input_flags: Vec::new(),
            output_flags: Vec::new(),
        }
    }

    /// Clones the program as a mutation target for a link attempt, per the
    /// "clone before mutate" lifecycle rule.
    pub fn clone_for_link(&self) -> StageProgram {
        self.clone()
    }

    pub fn set_input_flags(&mut self, index: i32, flags: VaryingFlags) {
        Self::set_flags_at(&mut self.input_flags, index, flags);
    }

    pub fn set_output_flags(&mut self, index: i32, flags: VaryingFlags) {
        Self::set_flags_at(&mut self.output_flags, index, flags);
    }

    pub fn input_flags_at(&self, index: i32) -> Option<VaryingFlags> {
        Self::flags_at(&self.input_flags, index)
    }

    pub fn output_flags_at(&self, index: i32) -> Option<VaryingFlags> {
        Self::flags_at(&self.output_flags, index)
    }

    fn set_flags_at(table: &mut Vec<Option<VaryingFlags>>, index: i32, flags: VaryingFlags) {
        if index < 0 {
            return;
        }
        let index = index as usize;
        if table.len() <= index {
            table.resize(index + 1, None);
        }
        table[index] = Some(flags);
    }

    fn flags_at(table: &[Option<VaryingFlags>], index: i32) -> Option<VaryingFlags> {
        if index < 0 {
            return None;
        }
        table.get(index as usize).copied().flatten()
    }

    /// Resets the derived scalars ahead of metadata recomputation (§4.5).
    pub fn reset_derived_masks(&mut self) {
        self.inputs_read = Mask32::ZERO;
        self.outputs_written = Mask64::ZERO;
        self.num_temporaries = 0;
        self.num_address_regs = 0;
    }
}
