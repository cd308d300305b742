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

//! End-to-end exercise of [`shaderlink::link`] across full vertex/geometry/
//! fragment pipelines, driven only through the public API.

use shaderlink::{AcceptAllDriver, ExternalCompiler, LinkContext, LinkError};
use shaderlink_types::{
    ApiProfile, CompiledUnit, DataType, Instruction, Opcode, Operand, OperandFile, Parameter,
    ParameterKind, PrimitiveType, ShaderProgram, StageKind, StageProgram, TextureInfo,
    TextureTarget, TransformFeedbackMode,
};

/// Every fixture below is self-contained (defines main, no unresolved refs),
/// so this compiler should never actually be called.
struct UnreachableCompiler;

impl ExternalCompiler for UnreachableCompiler {
    fn compile(&self, stage: StageKind, _source: &str) -> shaderlink::LinkResult<CompiledUnit> {
        Err(LinkError::Internal(format!("{} stage should not need concatenation", stage)))
    }
}

fn vertex_unit(varyings: &[(&str, DataType, u32)], writes_position: bool) -> CompiledUnit {
    let mut prog = StageProgram::new(StageKind::Vertex);
    if writes_position {
        prog.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Output, 0)));
    }
    for (i, (name, ty, size)) in varyings.iter().enumerate() {
        prog.parameters.push(Parameter::new(*name, *size, *ty, ParameterKind::Varying));
        prog.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, i as i32)));
    }
    CompiledUnit::new(StageKind::Vertex, "#version 330\nvoid main() {}\n", prog)
}

fn fragment_unit(varyings: &[(&str, DataType, u32)]) -> CompiledUnit {
    let mut prog = StageProgram::new(StageKind::Fragment);
    prog.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Output, 0)));
    for (i, (name, ty, size)) in varyings.iter().enumerate() {
        prog.parameters.push(Parameter::new(*name, *size, *ty, ParameterKind::Varying));
        prog.instructions
            .push(Instruction::new(Opcode::Add, Operand::new(OperandFile::Temporary, 0)).with_src(0, Operand::new(OperandFile::Varying, i as i32)));
    }
    CompiledUnit::new(StageKind::Fragment, "#version 330\nvoid main() {}\n", prog)
}

/// S1: a minimal two-stage program links cleanly, with the varying
/// renumbered into the vertex stage's output bank and the fragment stage's
/// input bank.
#[test]
fn s1_minimal_vertex_fragment_pipeline_links() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[("vColor", DataType::Vec4, 4)], true));
    program.add_unit(fragment_unit(&[("vColor", DataType::Vec4, 4)]));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();

    assert!(program.link_status);
    assert_eq!(program.varyings.len(), 1);
    let vs = program.vertex_program.as_ref().unwrap();
    let fs = program.fragment_program.as_ref().unwrap();
    assert!(vs.outputs_written.test_bit(0));
    assert!(fs.inputs_read.test_bit(1));
}

/// S2: a vertex -> geometry -> fragment pipeline chains the varying through
/// two independently-numbered boundaries (vertex outputs at base 8,
/// geometry inputs at base 0, geometry outputs at base 8, fragment inputs
/// at base 1).
#[test]
fn s2_three_stage_pipeline_chains_varying_through_geometry() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[("vNormal", DataType::Vec3, 3)], true));

    let mut gs_prog = StageProgram::new(StageKind::Geometry);
    gs_prog.parameters.push(Parameter::new("vNormal", 3, DataType::Vec3, ParameterKind::Varying));
    gs_prog
        .instructions
        .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Varying, 0)).with_src(0, Operand::new(OperandFile::Varying, 0)));
    program.add_unit(CompiledUnit::new(StageKind::Geometry, "#version 330\nvoid main() {}\n", gs_prog));
    program.geometry.max_vertices_out = 3;

    program.add_unit(fragment_unit(&[("vNormal", DataType::Vec3, 3)]));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();

    assert!(program.link_status);
    let gs = program.geometry_program.as_ref().unwrap();
    assert!(gs.inputs_read.test_bit(0));
    assert!(gs.outputs_written.test_bit(8));
    let fs = program.fragment_program.as_ref().unwrap();
    assert!(fs.inputs_read.test_bit(1));
}

/// S3: a sampler declared in both vertex and fragment stages is assigned a
/// single program-wide unit, and both stages' texture instructions are
/// rewritten to that unit.
#[test]
fn s3_sampler_shared_across_stages_gets_one_unit() {
    let mut program = ShaderProgram::new();

    let mut vs = StageProgram::new(StageKind::Vertex);
    vs.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Output, 0)));
    vs.parameters.push(Parameter::new("uHeightMap", 1, DataType::Sampler2D, ParameterKind::Sampler));
    vs.instructions.push(
        Instruction::new(Opcode::Tex, Operand::new(OperandFile::Temporary, 0)).with_texture(TextureInfo {
            sampler_unit: 0,
            target: TextureTarget::Tex2D,
            shadow: false,
        }),
    );
    program.add_unit(CompiledUnit::new(StageKind::Vertex, "#version 330\nvoid main() {}\n", vs));

    let mut fs = StageProgram::new(StageKind::Fragment);
    fs.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Output, 0)));
    fs.parameters.push(Parameter::new("uHeightMap", 1, DataType::Sampler2D, ParameterKind::Sampler));
    fs.instructions.push(
        Instruction::new(Opcode::Tex, Operand::new(OperandFile::Temporary, 1)).with_texture(TextureInfo {
            sampler_unit: 0,
            target: TextureTarget::Tex2D,
            shadow: false,
        }),
    );
    program.add_unit(CompiledUnit::new(StageKind::Fragment, "#version 330\nvoid main() {}\n", fs));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();

    assert!(program.link_status);
    let vs = program.vertex_program.as_ref().unwrap();
    let fs = program.fragment_program.as_ref().unwrap();
    assert_eq!(vs.instructions[1].texture.unwrap().sampler_unit, fs.instructions[1].texture.unwrap().sampler_unit);
    assert!(fs.samplers_used.test_bit(fs.instructions[1].texture.unwrap().sampler_unit));
}

/// S4: a user attribute pre-binding is honored, and "position" is always
/// slot 0 regardless of declaration order.
#[test]
fn s4_attribute_prebinding_is_honored_and_position_is_reserved() {
    let mut program = ShaderProgram::new();
    let mut vs = StageProgram::new(StageKind::Vertex);
    vs.instructions.push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Output, 0)));
    vs.attributes.push(shaderlink_types::AttributeParam {
        name: "aTexCoord".into(),
        size: 2,
        data_type: DataType::Vec2,
    });
    vs.attributes.push(shaderlink_types::AttributeParam {
        name: "position".into(),
        size: 3,
        data_type: DataType::Vec3,
    });
    vs.instructions
        .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Temporary, 0)).with_src(0, Operand::new(OperandFile::Input, 0)));
    vs.instructions
        .push(Instruction::new(Opcode::Mov, Operand::new(OperandFile::Temporary, 1)).with_src(0, Operand::new(OperandFile::Input, 1)));
    program.add_unit(CompiledUnit::new(StageKind::Vertex, "#version 330\nvoid main() {}\n", vs));
    program.add_unit(fragment_unit(&[]));
    program.bind_attribute("aTexCoord", 5);

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();

    assert!(program.link_status);
    let position_slot = program.attributes.iter().find(|e| e.name == "position").and_then(|e| e.slot);
    assert_eq!(position_slot, Some(0));
    let texcoord_slot = program.attributes.iter().find(|e| e.name == "aTexCoord").and_then(|e| e.slot);
    assert_eq!(texcoord_slot, Some(5));
}

/// S5: transform feedback referencing a varying that was actually linked
/// succeeds; referencing one that was never declared fails with
/// `UnresolvedSymbol`.
#[test]
fn s5_transform_feedback_resolves_against_linked_varyings() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[("vColor", DataType::Vec4, 4)], true));
    program.add_unit(fragment_unit(&[("vColor", DataType::Vec4, 4)]));
    program.transform_feedback.mode = TransformFeedbackMode::Interleaved;
    program.transform_feedback.varyings.push("vColor".into());

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;
    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();
    assert!(program.link_status);

    let mut bad_program = ShaderProgram::new();
    bad_program.add_unit(vertex_unit(&[("vColor", DataType::Vec4, 4)], true));
    bad_program.add_unit(fragment_unit(&[("vColor", DataType::Vec4, 4)]));
    bad_program.transform_feedback.varyings.push("vMissing".into());
    let err = shaderlink::link(&ctx, &mut bad_program, &compiler, &mut driver).unwrap_err();
    assert!(matches!(err, LinkError::UnresolvedSymbol(_)));
    assert!(!bad_program.link_status);
}

/// S6: the ES profile rejects a fragment-only program (no vertex stage),
/// while the core profile accepts the same program shape so long as it
/// satisfies the other invariants. Demonstrated here via the ES rejection,
/// since a fragment-only program can never satisfy "vertex writes position"
/// either way.
#[test]
fn s6_es_profile_requires_both_mandatory_stages() {
    let mut program = ShaderProgram::new();
    program.add_unit(fragment_unit(&[]));

    let mut ctx = LinkContext::default();
    ctx.profile = ApiProfile::Es;
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    let err = shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap_err();
    assert!(matches!(err, LinkError::InputInvalid(_)));
    assert!(!program.link_status);
    assert!(program.info_log.is_some());
}

/// Re-linking the same program twice from scratch produces the same
/// result both times, confirming the clone-before-mutate / reset-for-link
/// lifecycle leaves no state behind between attempts.
#[test]
fn relinking_the_same_program_is_idempotent() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[("vColor", DataType::Vec4, 4)], true));
    program.add_unit(fragment_unit(&[("vColor", DataType::Vec4, 4)]));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();
    let first_varying_count = program.varyings.len();
    let first_outputs = program.vertex_program.as_ref().unwrap().outputs_written;

    shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap();
    assert_eq!(program.varyings.len(), first_varying_count);
    assert_eq!(program.vertex_program.as_ref().unwrap().outputs_written, first_outputs);
}

/// A fragment stage reading a varying the vertex stage never writes is a
/// hard cross-stage mismatch, not a silently-accepted no-op read.
#[test]
fn fragment_varying_with_no_vertex_producer_fails_to_link() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[], true));
    program.add_unit(fragment_unit(&[("vColor", DataType::Vec4, 4)]));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    let err = shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap_err();
    assert!(matches!(err, LinkError::CrossStageMismatch(_)));
}

/// A geometry stage present without a max-vertices-out declaration is
/// rejected before any driver notification happens.
#[test]
fn geometry_stage_without_max_vertices_out_fails_to_link() {
    let mut program = ShaderProgram::new();
    program.add_unit(vertex_unit(&[], true));
    let mut gs_prog = StageProgram::new(StageKind::Geometry);
    gs_prog.instructions.push(Instruction::new(Opcode::Nop, Operand::new(OperandFile::Temporary, 0)));
    program.add_unit(CompiledUnit::new(StageKind::Geometry, "#version 330\nvoid main() {}\n", gs_prog));
    program.add_unit(fragment_unit(&[]));

    let ctx = LinkContext::default();
    let compiler = UnreachableCompiler;
    let mut driver = AcceptAllDriver;

    let err = shaderlink::link(&ctx, &mut program, &compiler, &mut driver).unwrap_err();
    assert!(matches!(err, LinkError::InputInvalid(_)));
}
