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

use std::collections::HashMap;

use crate::attribute::AttributeTable;
use crate::program::StageProgram;
use crate::stage::{PrimitiveType, StageKind, TransformFeedbackMode};
use crate::uniform::UniformTable;
use crate::unit::CompiledUnit;
use crate::varying::VaryingTable;

/// Geometry-stage configuration set by the host before linking.
#[derive(Clone, Debug)]
pub struct GeometryConfig {
    pub input_primitive: PrimitiveType,
    pub output_primitive: PrimitiveType,
    pub max_vertices_out: u32,
}

impl Default for GeometryConfig {
    fn default() -> GeometryConfig {
        GeometryConfig {
            input_primitive: PrimitiveType::Triangles,
            output_primitive: PrimitiveType::TriangleStrip,
            max_vertices_out: 0,
        }
    }
}

/// Transform-feedback configuration set by the host before linking.
#[derive(Clone, Debug, Default)]
pub struct TransformFeedbackConfig {
    pub mode: TransformFeedbackMode,
    pub varyings: Vec<String>,
}

impl Default for TransformFeedbackMode {
    fn default() -> TransformFeedbackMode {
        TransformFeedbackMode::Interleaved
    }
}

/// The linkable container: owns the compiled units the front-end produced,
/// and after a successful link, the merged symbol tables and the rewritten
/// per-stage programs.
#[derive(Default)]
pub struct ShaderProgram {
    pub units: Vec<CompiledUnit>,

    pub vertex_program: Option<StageProgram>,
    pub geometry_program: Option<StageProgram>,
    pub fragment_program: Option<StageProgram>,

    pub varyings: VaryingTable,
    pub uniforms: UniformTable,
    pub attributes: AttributeTable,

    pub link_status: bool,
    pub info_log: Option<String>,

    pub transform_feedback: TransformFeedbackConfig,
    pub geometry: GeometryConfig,

    /// User-assigned attribute pre-bindings (name -> slot), populated by the
    /// host before link, consumed by the attribute resolver (§4.4).
    pub attribute_bindings: HashMap<String, u32>,
}

impl ShaderProgram {
    pub fn new() -> ShaderProgram {
        ShaderProgram::default()
    }

    pub fn bind_attribute(&mut self, name: impl Into<String>, slot: u32) {
        self.attribute_bindings.insert(name.into(), slot);
    }

    pub fn add_unit(&mut self, unit: CompiledUnit) {
        self.units.push(unit);
    }

    pub fn units_for_stage(&self, stage: StageKind) -> impl Iterator<Item = &CompiledUnit> {
        self.units.iter().filter(move |u| u.stage == stage)
    }

    pub fn has_stage(&self, stage: StageKind) -> bool {
        self.units_for_stage(stage).next().is_some()
    }

    /// Clears the program-wide symbol tables and linked programs ahead of a
    /// fresh link attempt, per §5's "re-created from scratch on every link".
    pub fn reset_for_link(&mut self) {
        self.varyings = VaryingTable::new();
        self.uniforms = UniformTable::new();
        self.attributes = AttributeTable::new();
        self.vertex_program = None;
        self.geometry_program = None;
        self.fragment_program = None;
        self.link_status = false;
        self.info_log = None;
    }

    pub fn linked_program(&self, stage: StageKind) -> Option<&StageProgram> {
        match stage {
            StageKind::Vertex => self.vertex_program.as_ref(),
            StageKind::Geometry => self.geometry_program.as_ref(),
            StageKind::Fragment => self.fragment_program.as_ref(),
        }
    }

    pub fn linked_program_mut(&mut self, stage: StageKind) -> Option<&mut StageProgram> {
        match stage {
            StageKind::Vertex => self.vertex_program.as_mut(),
            StageKind::Geometry => self.geometry_program.as_mut(),
            StageKind::Fragment => self.fragment_program.as_mut(),
        }
    }

    pub fn set_linked_program(&mut self, stage: StageKind, program: StageProgram) {
        match stage {
            StageKind::Vertex => self.vertex_program = Some(program),
            StageKind::Geometry => self.geometry_program = Some(program),
            StageKind::Fragment => self.fragment_program = Some(program),
        }
    }
}
