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

//! §4.1: main-shader selection and source concatenation.

use log::{debug, info};
use regex::Regex;
use shaderlink_types::{CompiledUnit, PrimitiveType, ShaderProgram, StageKind, StageProgram};

use crate::context::ExternalCompiler;
use crate::error::{LinkError, LinkResult};

fn version_directive_regex() -> Regex {
    Regex::new(r"^(\s*)#version\b").expect("static regex is valid")
}

/// Replaces the directive's first two characters with a line comment
/// marker, turning `#version 330` into `//ersion 330`.
fn suppress_version_line(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    let mut bytes = line.as_bytes().to_vec();
    if bytes.len() >= indent + 2 {
        bytes[indent] = b'/';
        bytes[indent + 1] = b'/';
    }
    String::from_utf8(bytes).unwrap_or_else(|_| line.to_string())
}

fn concatenate_units(units: &[&CompiledUnit], stage: StageKind, geometry_input: Option<PrimitiveType>) -> String {
    let re = version_directive_regex();
    let mut out = String::new();
    if let Some(prim) = geometry_input {
        out.push_str(&format!("const int gl_VerticesIn = {};\n", prim.vertices_in()));
    }
    for (i, unit) in units.iter().enumerate() {
        for line in unit.source.split_inclusive('\n') {
            if i > 0 && re.is_match(line) {
                out.push_str(&suppress_version_line(line));
            } else {
                out.push_str(line);
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Selects (or synthesizes) the compiled unit that becomes the stage's
/// linkable program.
pub fn select_main_shader(
    program: &ShaderProgram,
    stage: StageKind,
    compiler: &dyn ExternalCompiler,
) -> LinkResult<StageProgram> {
    let units: Vec<&CompiledUnit> = program.units_for_stage(stage).collect();
    if units.is_empty() {
        return Err(LinkError::InputInvalid(format!(
            "no compiled unit is available for the {} stage",
            stage
        )));
    }

    if let Some(unit) = units.iter().find(|u| u.is_self_contained()) {
        debug!("{} stage: unit defines main and has no unresolved references, using it directly", stage);
        return Ok(unit
            .program
            .clone()
            .expect("a self-contained unit always carries a compiled program"));
    }

    info!("{} stage: no self-contained unit found, concatenating {} unit(s)", stage, units.len());
    let geometry_input = (stage == StageKind::Geometry).then(|| program.geometry.input_primitive);
    let combined_source = concatenate_units(&units, stage, geometry_input);
    let combined = compiler
        .compile(stage, &combined_source)
        .map_err(|_| LinkError::UnresolvedSymbol(format!("Unresolved symbols in {} shader", stage)))?;
    if !combined.defines_main || combined.has_unresolved_refs {
        return Err(LinkError::UnresolvedSymbol(format!("Unresolved symbols in {} shader", stage)));
    }
    combined
        .program
        .ok_or_else(|| LinkError::Internal("external compiler reported success with no program".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shaderlink_types::StageProgram;

    struct StubCompiler {
        defines_main: bool,
        has_unresolved: bool,
    }

    impl ExternalCompiler for StubCompiler {
        fn compile(&self, stage: StageKind, _source: &str) -> LinkResult<CompiledUnit> {
            let program = StageProgram::new(stage);
            let mut unit = CompiledUnit::new(stage, "", program);
            unit.defines_main = self.defines_main;
            unit.has_unresolved_refs = self.has_unresolved;
            Ok(unit)
        }
    }

    fn stub_unit(stage: StageKind, source: &str, defines_main: bool, has_unresolved: bool) -> CompiledUnit {
        let program = StageProgram::new(stage);
        CompiledUnit::new(stage, source, program)
            .with_defines_main(defines_main)
            .with_unresolved_refs(has_unresolved)
    }

    #[test]
    fn picks_self_contained_unit_without_concatenating() {
        let mut prog = ShaderProgram::new();
        prog.add_unit(stub_unit(StageKind::Fragment, "#version 330\nvoid main() {}\n", true, false));
        let compiler = StubCompiler { defines_main: false, has_unresolved: false };
        let linked = select_main_shader(&prog, StageKind::Fragment, &compiler).unwrap();
        assert_eq!(linked.stage, StageKind::Fragment);
    }

    #[test]
    fn concatenates_when_no_unit_is_self_contained() {
        let mut prog = ShaderProgram::new();
        prog.add_unit(stub_unit(StageKind::Fragment, "#version 330\nvoid helper() {}\n", false, true));
        prog.add_unit(stub_unit(StageKind::Fragment, "#version 330\nvoid main() { helper(); }\n", true, false));
        let compiler = StubCompiler { defines_main: true, has_unresolved: false };
        let linked = select_main_shader(&prog, StageKind::Fragment, &compiler).unwrap();
        assert_eq!(linked.stage, StageKind::Fragment);
    }

    #[test]
    fn fails_when_concatenated_result_still_lacks_main() {
        let mut prog = ShaderProgram::new();
        prog.add_unit(stub_unit(StageKind::Fragment, "void helper() {}\n", false, true));
        let compiler = StubCompiler { defines_main: false, has_unresolved: true };
        let err = select_main_shader(&prog, StageKind::Fragment, &compiler).unwrap_err();
        assert!(matches!(err, LinkError::UnresolvedSymbol(_)));
    }

    #[test]
    fn fails_with_no_units_for_stage() {
        let prog = ShaderProgram::new();
        let compiler = StubCompiler { defines_main: true, has_unresolved: false };
        let err = select_main_shader(&prog, StageKind::Geometry, &compiler).unwrap_err();
        assert!(matches!(err, LinkError::InputInvalid(_)));
    }

    #[test]
    fn suppresses_only_non_first_version_directives() {
        let units_src = vec!["#version 330\nint a;\n", "#version 410\nint b;\n"];
        let units: Vec<CompiledUnit> = units_src
            .iter()
            .map(|s| stub_unit(StageKind::Vertex, s, false, true))
            .collect();
        let refs: Vec<&CompiledUnit> = units.iter().collect();
        let combined = concatenate_units(&refs, StageKind::Vertex, None);
        assert!(combined.contains("#version 330"));
        assert!(!combined.contains("#version 410"));
        assert!(combined.contains("//ersion 410"));
    }

    #[test]
    fn prepends_vertices_in_for_geometry_stage() {
        let units = vec![stub_unit(StageKind::Geometry, "void main() {}\n", true, false)];
        let refs: Vec<&CompiledUnit> = units.iter().collect();
        let combined = concatenate_units(&refs, StageKind::Geometry, Some(PrimitiveType::Triangles));
        assert!(combined.starts_with("const int gl_VerticesIn = 3;"));
    }
}
