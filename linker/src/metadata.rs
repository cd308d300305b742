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

//! §4.5: bitmask and scalar metadata recomputation.
//!
//! Runs after every operand has its final, post-merge register index, so it
//! is the one place that needs to reason about relative addressing: a
//! relatively-addressed operand's runtime index is unknown at link time, so
//! instead of a single bit the whole span of the array its base belongs to
//! is marked touched, bounded by that array's own size where the base names
//! one (varying, draw-buffer output); a generic-attribute base has no such
//! bound and reaches to the end of the register file.

use shaderlink_types::{OperandFile, ShaderProgram, StageKind, StageProgram};

use crate::bases::{relative_address_base, RelativeAddressBase};
use crate::context::LinkContext;

/// Expands a relatively-addressed operand's base register into the span it
/// might touch at runtime. `width_bits` is the hard ceiling imposed by the
/// mask's own width (32 for `InputsRead`, 64 for `OutputsWritten`); within
/// that ceiling, the span is further bounded by the addressed array's own
/// size unless the base names an unbounded or singular register (§4.5/§6).
fn expand_relative(ctx: &LinkContext, stage: StageKind, file: OperandFile, index: i32, width_bits: u32) -> (u32, u32) {
    let start = index.max(0) as u32;
    if start >= width_bits {
        return (start, 0);
    }
    let (kind, base) = relative_address_base(stage, file, index);
    let base = base.max(0) as u32;
    let end = match kind {
        RelativeAddressBase::Varying => base.saturating_add(ctx.max_varying).min(width_bits),
        RelativeAddressBase::DrawBuffer => base.saturating_add(ctx.max_draw_buffers).min(width_bits),
        RelativeAddressBase::GenericAttribute | RelativeAddressBase::Scalar => width_bits,
    };
    if start >= end {
        (start, 0)
    } else {
        (start, end - start)
    }
}

fn recompute_stage(ctx: &LinkContext, prog: &mut StageProgram) {
    prog.reset_derived_masks();
    prog.samplers_used = Default::default();
    prog.shadow_samplers = Default::default();
    prog.sampler_targets.clear();

    let mut max_temporary: i32 = -1;
    let mut max_address: i32 = -1;

    for instr in &prog.instructions {
        for operand in instr.operands() {
            match operand.file {
                OperandFile::Input => {
                    if operand.rel_addr {
                        let (start, count) = expand_relative(ctx, prog.stage, OperandFile::Input, operand.index, 32);
                        prog.inputs_read.set_range(start, count);
                    } else if operand.index >= 0 {
                        prog.inputs_read.set_bit(operand.index as u32);
                    }
                }
                OperandFile::Output => {
                    if operand.rel_addr {
                        let (start, count) = expand_relative(ctx, prog.stage, OperandFile::Output, operand.index, 64);
                        prog.outputs_written.set_range(start, count);
                    } else if operand.index >= 0 {
                        prog.outputs_written.set_bit(operand.index as u32);
                    }
                }
                OperandFile::Temporary => {
                    max_temporary = max_temporary.max(operand.index);
                }
                OperandFile::Address => {
                    max_address = max_address.max(operand.index);
                }
                _ => {}
            }
        }

        if let Some(tex) = &instr.texture {
            let unit = tex.sampler_unit as usize;
            if prog.sampler_targets.len() <= unit {
                prog.sampler_targets.resize(unit + 1, None);
            }
            prog.sampler_targets[unit] = Some(tex.target);
            prog.samplers_used.set_bit(tex.sampler_unit);
            if tex.shadow {
                prog.shadow_samplers.set_bit(tex.sampler_unit);
            }
        }
    }

    prog.num_temporaries = (max_temporary + 1).max(0) as u32;
    prog.num_address_regs = (max_address + 1).max(0) as u32;
}

/// Recomputes every present stage's derived masks and scalar counts from its
/// final (post-merge) instruction stream.
pub fn recompute_metadata(ctx: &LinkContext, program: &mut ShaderProgram) {
    for stage in [StageKind::Vertex, StageKind::Geometry, StageKind::Fragment] {
        if let Some(prog) = program.linked_program_mut(stage) {
            recompute_stage(ctx, prog);
        }
    }
}
