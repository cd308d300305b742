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

//! §4.3: uniform/sampler symbol table merge and sampler unit assignment.
//!
//! Plain uniforms are shared by name only: each stage keeps its own local
//! constant bank, loaded from the one named value at bind time, so merging
//! them never touches operands. Samplers are different: a texture
//! instruction's [`TextureInfo`] carries the sampler unit directly, and that
//! unit is shared program-wide, so the merger assigns it and rewrites it.

use std::collections::HashMap;

use log::debug;
use shaderlink_types::{DataType, ParameterKind, ShaderProgram, StageKind, StageProgram};

use crate::bases::present_stages;
use crate::context::LinkContext;
use crate::error::{LinkError, LinkResult};

fn merge_named_uniforms(program: &mut ShaderProgram, stage: StageKind) -> LinkResult<()> {
    let prog = program
        .linked_program(stage)
        .ok_or_else(|| LinkError::Internal(format!("no cloned program for {} stage", stage)))?;

    let entries: Vec<(usize, String, u32, DataType)> = prog
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, p)| matches!(p.kind, ParameterKind::Uniform | ParameterKind::Sampler) && p.used)
        .map(|(i, p)| (i, p.name.clone(), p.size, p.data_type))
        .collect();

    for (param_index, name, size, data_type) in entries {
        let uniform_index = program.uniforms.get_or_insert(&name);
        let existing = program.uniforms.get(uniform_index);
        if let Some(other_stage) = [StageKind::Vertex, StageKind::Geometry, StageKind::Fragment]
            .into_iter()
            .find(|s| *s != stage && existing.stage_param(*s).is_some())
        {
            let other_prog = program.linked_program(other_stage).unwrap();
            let other_param = &other_prog.parameters[existing.stage_param(other_stage).unwrap()];
            if other_param.size != size || other_param.data_type != data_type {
                return Err(LinkError::SymbolMismatch(format!(
                    "uniform '{}' disagrees on type/size between the {} and {} stages",
                    name, other_stage, stage
                )));
            }
        }
        program.uniforms.get_mut(uniform_index).set_stage_param(stage, param_index);
    }
    Ok(())
}

/// Assigns a program-wide sampler unit to each distinct sampler name, in
/// first-seen pipeline order, and checks it against the texture image unit
/// limit.
fn assign_sampler_units(ctx: &LinkContext, program: &ShaderProgram, chain: &[StageKind]) -> LinkResult<HashMap<String, u32>> {
    let mut units = HashMap::new();
    let mut next_unit = 0u32;
    for &stage in chain {
        let prog = program.linked_program(stage).unwrap();
        for param in &prog.parameters {
            if param.kind == ParameterKind::Sampler && param.used && !units.contains_key(&param.name) {
                if next_unit >= ctx.max_texture_image_units {
                    return Err(LinkError::LimitExceeded(format!(
                        "sampler '{}' exceeds the limit of {} texture image units",
                        param.name, ctx.max_texture_image_units
                    )));
                }
                units.insert(param.name.clone(), next_unit);
                next_unit += 1;
            }
        }
    }
    Ok(units)
}

fn apply_sampler_units(program: &mut ShaderProgram, stage: StageKind, units: &HashMap<String, u32>) -> LinkResult<()> {
    let prog = program
        .linked_program_mut(stage)
        .ok_or_else(|| LinkError::Internal(format!("no cloned program for {} stage", stage)))?;

    let mut local_to_global: HashMap<u32, u32> = HashMap::new();
    for param in &mut prog.parameters {
        if param.kind == ParameterKind::Sampler && param.used {
            if let Some(&global_unit) = units.get(&param.name) {
                local_to_global.insert(param.local_sampler_number(), global_unit);
                param.set_local_sampler_number(global_unit);
            }
        }
    }

    rewrite_texture_units(prog, &local_to_global);
    Ok(())
}

/// Only remaps the unit a texture instruction addresses; `samplers_used`,
/// `shadow_samplers` and `sampler_targets` are derived from the rewritten
/// instructions by the recompute pass (§4.5), not set here.
fn rewrite_texture_units(prog: &mut StageProgram, local_to_global: &HashMap<u32, u32>) {
    for instr in &mut prog.instructions {
        if let Some(tex) = &mut instr.texture {
            if let Some(&global_unit) = local_to_global.get(&tex.sampler_unit) {
                tex.sampler_unit = global_unit;
            }
        }
    }
}

/// Merges the program-wide uniform table and assigns sampler units.
pub fn merge_uniforms(ctx: &LinkContext, program: &mut ShaderProgram) -> LinkResult<()> {
    let chain = present_stages(program);

    for &stage in &chain {
        merge_named_uniforms(program, stage)?;
    }

    let units = assign_sampler_units(ctx, program, &chain)?;
    debug!("uniform merge: {} named uniform(s), {} sampler unit(s) assigned", program.uniforms.len(), units.len());
    for &stage in &chain {
        apply_sampler_units(program, stage, &units)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaderlink_types::{DataType, Instruction, Opcode, Operand, OperandFile, Parameter, TextureInfo, TextureTarget};

    fn uniform_param(name: &str, data_type: DataType) -> Parameter {
        Parameter::new(name, 1, data_type, ParameterKind::Uniform)
    }

    fn sampler_param(name: &str, local_unit: u32) -> Parameter {
        let mut p = Parameter::new(name, 1, DataType::Sampler2D, ParameterKind::Sampler);
        p.set_local_sampler_number(local_unit);
        p
    }

    #[test]
    fn merges_same_named_uniform_across_stages() {
        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(uniform_param("uModel", DataType::Mat4));
        program.vertex_program = Some(vs);
        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(uniform_param("uModel", DataType::Mat4));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        merge_uniforms(&ctx, &mut program).unwrap();

        assert_eq!(program.uniforms.len(), 1);
        let entry = program.uniforms.get(0);
        assert!(entry.vertex_param.is_some());
        assert!(entry.fragment_param.is_some());
    }

    #[test]
    fn rejects_uniform_type_mismatch() {
        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(uniform_param("uFoo", DataType::Vec4));
        program.vertex_program = Some(vs);
        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(uniform_param("uFoo", DataType::Float));
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        let err = merge_uniforms(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::SymbolMismatch(_)));
    }

    #[test]
    fn assigns_one_sampler_unit_per_distinct_name() {
        let mut program = ShaderProgram::new();
        let mut vs = StageProgram::new(StageKind::Vertex);
        vs.parameters.push(sampler_param("uDiffuse", 0));
        program.vertex_program = Some(vs);

        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(sampler_param("uDiffuse", 0));
        let mut instr = Instruction::new(Opcode::Tex, Operand::new(OperandFile::Temporary, 0));
        instr = instr.with_texture(TextureInfo {
            sampler_unit: 0,
            target: TextureTarget::Tex2D,
            shadow: false,
        });
        fs.instructions.push(instr);
        program.fragment_program = Some(fs);

        let ctx = LinkContext::default();
        merge_uniforms(&ctx, &mut program).unwrap();

        let fs = program.fragment_program.as_ref().unwrap();
        assert_eq!(fs.instructions[0].texture.unwrap().sampler_unit, 0);
    }

    #[test]
    fn enforces_sampler_unit_limit() {
        let mut ctx = LinkContext::default();
        ctx.max_texture_image_units = 1;

        let mut program = ShaderProgram::new();
        let mut fs = StageProgram::new(StageKind::Fragment);
        fs.parameters.push(sampler_param("uA", 0));
        fs.parameters.push(sampler_param("uB", 1));
        program.fragment_program = Some(fs);

        let err = merge_uniforms(&ctx, &mut program).unwrap_err();
        assert!(matches!(err, LinkError::LimitExceeded(_)));
    }
}
