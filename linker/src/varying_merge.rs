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

//! §4.2: varying symbol table merge and operand rewriting.

use std::collections::{HashMap, HashSet};

use log::debug;
use shaderlink_types::{DataType, OperandFile, ParameterKind, ShaderProgram, StageKind, StageProgram, VaryingEntry, VaryingFlags};

use crate::bases::{present_stages, varying_base};
use crate::context::LinkContext;
use crate::error::{LinkError, LinkResult};

/// A stage's local view of one varying: the contiguous local register range
/// it occupies, independent of program-wide assignment.
struct VaryingUse {
    local_base: u32,
    span: u32,
    name: String,
    size: u32,
    data_type: DataType,
    flags: VaryingFlags,
}

fn collect_varying_uses(prog: &StageProgram) -> Vec<VaryingUse> {
    let mut cursor = 0u32;
    let mut out = Vec::new();
    for param in &prog.parameters {
        if param.kind == ParameterKind::Varying && param.used {
            let span = param.data_type.register_span();
            out.push(VaryingUse {
                local_base: cursor,
                span,
                name: param.name.clone(),
                size: param.size,
                data_type: param.data_type,
                flags: param.flags,
            });
            cursor += span;
        }
    }
    out
}

fn stage_program_pair<'a>(
    program: &'a mut ShaderProgram,
    writer: StageKind,
    reader: StageKind,
) -> LinkResult<(&'a mut StageProgram, &'a mut StageProgram)> {
    use StageKind::*;
    let pair = match (writer, reader) {
        (Vertex, Geometry) => (program.vertex_program.as_mut(), program.geometry_program.as_mut()),
        (Vertex, Fragment) => (program.vertex_program.as_mut(), program.fragment_program.as_mut()),
        (Geometry, Fragment) => (program.geometry_program.as_mut(), program.fragment_program.as_mut()),
        _ => (None, None),
    };
    match pair {
        (Some(w), Some(r)) => Ok((w, r)),
        _ => Err(LinkError::Internal(format!(
            "no cloned stage programs available for the {}->{} varying boundary",
            writer, reader
        ))),
    }
}

/// Rewrites every `Varying`-file operand whose local register falls in one
/// of `uses`' ranges to `target_file` at its globally assigned register, and
/// records the carried flag bits at that register for later lookup.
fn rewrite_stage_operands(
    prog: &mut StageProgram,
    uses: &[VaryingUse],
    assigned: &HashMap<String, (u32, u32)>,
    target_file: OperandFile,
    base: u32,
    is_output: bool,
) {
    let mut remap: HashMap<i32, (i32, VaryingFlags)> = HashMap::new();
    for u in uses {
        if let Some(&(global_base, span)) = assigned.get(&u.name) {
            for offset in 0..span {
                let local_reg = (u.local_base + offset) as i32;
                let global_reg = (base + global_base + offset) as i32;
                remap.insert(local_reg, (global_reg, u.flags));
            }
        }
    }

    for (_, &(global_reg, flags)) in remap.iter() {
        if is_output {
            prog.set_output_flags(global_reg, flags);
        } else {
            prog.set_input_flags(global_reg, flags);
        }
    }

    for instr in &mut prog.instructions {
        for operand in instr.operands_mut() {
            if operand.file == OperandFile::Varying {
                if let Some(&(global_reg, _)) = remap.get(&operand.index) {
                    operand.file = target_file;
                    operand.index = global_reg;
                }
            }
        }
    }
}

fn merge_boundary(ctx: &LinkContext, program: &mut ShaderProgram, writer: StageKind, reader: StageKind) -> LinkResult<()> {
    let (writer_prog, reader_prog) = stage_program_pair(program, writer, reader)?;
    let writer_uses = collect_varying_uses(writer_prog);
    let reader_uses = collect_varying_uses(reader_prog);

    let write_base = varying_base(writer).write_base as u32;
    let read_base = varying_base(reader).read_base as u32;

    let mut order = Vec::new();
    let mut seen = HashSet::new();
    for u in writer_uses.iter().chain(reader_uses.iter()) {
        if seen.insert(u.name.clone()) {
            order.push(u.name.clone());
        }
    }

    let mut global_cursor = 0u32;
    let mut assigned: HashMap<String, (u32, u32)> = HashMap::new();

    for name in &order {
        let w = writer_uses.iter().find(|u| &u.name == name);
        let r = reader_uses.iter().find(|u| &u.name == name);

        let (data_type, size, flags) = match (w, r) {
            (Some(w), Some(r)) => {
                if w.data_type != r.data_type || w.size != r.size {
                    return Err(LinkError::SymbolMismatch(format!(
                        "varying '{}' disagrees on type/size between the {} and {} stages",
                        name, writer, reader
                    )));
                }
                if w.flags != r.flags {
                    return Err(LinkError::SymbolMismatch(format!(
                        "varying '{}' disagrees on centroid/invariant flags between the {} and {} stages",
                        name, writer, reader
                    )));
                }
                (w.data_type, w.size, w.flags)
            }
            (Some(w), None) => (w.data_type, w.size, w.flags),
            (None, Some(_)) => {
                return Err(LinkError::CrossStageMismatch(format!(
                    "the {} stage reads varying '{}' but the {} stage never writes it",
                    reader, name, writer
                )));
            }
            (None, None) => unreachable!("name was collected from one of the two use lists"),
        };

        let span = data_type.register_span();
        let global_base = global_cursor;
        global_cursor += span;
        if global_cursor > ctx.max_varying {
            return Err(LinkError::LimitExceeded(format!(
                "varying registers between the {} and {} stages exceed the limit of {}",
                writer, reader, ctx.max_varying
            )));
        }

        program.varyings.push(VaryingEntry {
            name: name.clone(),
            size,
            data_type,
            flags,
        });
        assigned.insert(name.clone(), (global_base, span));
    }

    debug!("{}->{} varying boundary: {} symbol(s) merged", writer, reader, order.len());

    let (writer_prog, reader_prog) = stage_program_pair(program, writer, reader)?;
    rewrite_stage_operands(writer_prog, &writer_uses, &assigned, OperandFile::Output, write_base, true);
    rewrite_stage_operands(reader_prog, &reader_uses, &assigned, OperandFile::Input, read_base, false);

    Ok(())
}

/// Merges every adjacent stage boundary's varyings into `program.varyings`
/// and rewrites the producing/consuming instruction streams in place.
pub fn merge_varyings(ctx: &LinkContext, program: &mut ShaderProgram) -> LinkResult<()> {
    let chain = present_stages(program);
    for pair in chain.windows(2) {
        merge_boundary(ctx, program, pair[0], pair[1])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaderlink_types::{Instruction, Opcode, Operand, Parameter};

    fn varying_param(name: &str, data_type: DataType) -> Parameter {
        Parameter::new(name, data_type.register_span() * 4, data_type, ParameterKind::Varying)
    }

    #[test]
    fn rewrites_matching_varying_to_output_and_input() {
        let mut program = ShaderProgram::new();

        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(varying_param("vColor", DataType::Vec4));
        vs.instructions
            .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 0)));
        program.vertex_program = Some(vs);

        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("vColor", DataType::Vec4));
        fs.instructions
            .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 0)));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        merge_varyings(&ctx, &mut program).unwrap();

        assert_eq!(program.varyings.len(), 1);
        let vs = program.vertex_program.as_ref().unwrap();
        assert_eq!(vs.instructions[0].dst.file, OperandFile::Output);
        let fs = program.fragment_program.as_ref().unwrap();
        assert_eq!(fs.instructions[0].dst.file, OperandFile::Input);
    }

    #[test]
    fn rejects_type_mismatch_across_stages() {
        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(varying_param("vFoo", DataType::Vec4));
        program.vertex_program = Some(vs);

        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("vFoo", DataType::Vec2));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        let err = merge_varyings(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::SymbolMismatch(_)));
    }

    #[test]
    fn rejects_flag_mismatch_across_stages() {
        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters
            .push(varying_param("vFoo", DataType::Vec4).with_flags(VaryingFlags { centroid: true, invariant: false }));
        program.vertex_program = Some(vs);

        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("vFoo", DataType::Vec4));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        let err = merge_varyings(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::SymbolMismatch(_)));
    }

    #[test]
    fn enforces_varying_register_limit() {
        let mut ctx = LinkContext::default();
        ctx.max_varying = 1;

        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(varying_param("vA", DataType::Mat4));
        program.vertex_program = Some(vs);
        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("vA", DataType::Mat4));
        program.fragment_program = Some(fs);

        let err = merge_varyings(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::LimitExceeded(_)));
    }

    #[test]
    fn rejects_varying_read_with_no_producer() {
        let mut program = ShaderProgram::new();
        let vs = StageProgram::new(StageKind::Vertex);
        program.vertex_program = Some(vs);
        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("vGhost", DataType::Vec4));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        let err = merge_varyings(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::CrossStageMismatch(_)));
    }

    #[test]
    fn geometry_boundary_chains_vertex_to_fragment() {
        let mut program = ShaderProgram::new();

        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(varying_param("vPos", DataType::Vec4));
        vs.instructions
            .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 0)));
        program.vertex_program = Some(vs);

        let mut gs = StageProgram::new(StageKind::Geometry);
        gs.parameters.push(varying_param("vPos", DataType::Vec4));
        gs.parameters.push(varying_param("gPos", DataType::Vec4));
        gs.instructions
            .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 1)).with_src(0, Operand::new(OperandFile::Varying, 0)));
        program.geometry_program = Some(gs);

        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(varying_param("gPos", DataType::Vec4));
        fs.instructions
            .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 0)));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        merge_varyings(&ctx, &mut program).unwrap();
        assert_eq!(program.varyings.len(), 2);
    }
}
