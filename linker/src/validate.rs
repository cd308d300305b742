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

//! §4.6: cross-stage validation that runs after every symbol table and
//! bitmask has been recomputed.

use shaderlink_types::{ApiProfile, ShaderProgram, StageKind, TransformFeedbackMode};

use crate::bases::{FRAGMENT_COLOR_OUTPUT, FIRST_FRAGMENT_DATA_OUTPUT};
use crate::context::LinkContext;
use crate::error::{LinkError, LinkResult};

fn validate_position_written(program: &ShaderProgram) -> LinkResult<()> {
    let vs = program
        .vertex_program
        .as_ref()
        .ok_or_else(|| LinkError::InputInvalid("a vertex stage is required".into()))?;
    if !vs.outputs_written.test_bit(0) {
        return Err(LinkError::CrossStageMismatch(
            "the vertex stage never writes the built-in position output".into(),
        ));
    }
    Ok(())
}

fn validate_geometry_requirements(program: &ShaderProgram) -> LinkResult<()> {
    if program.geometry_program.is_none() {
        return Ok(());
    }
    if program.vertex_program.is_none() {
        return Err(LinkError::InputInvalid("a geometry stage requires a vertex stage".into()));
    }
    if program.geometry.max_vertices_out == 0 {
        return Err(LinkError::InputInvalid(
            "the geometry stage must declare a non-zero maximum output vertex count".into(),
        ));
    }
    Ok(())
}

fn validate_exclusive_fragment_outputs(program: &ShaderProgram) -> LinkResult<()> {
    let fs = match &program.fragment_program {
        Some(fs) => fs,
        None => return Ok(()),
    };
    let writes_scalar_color = fs.outputs_written.test_bit(FRAGMENT_COLOR_OUTPUT as u32);
    let writes_indexed = (FIRST_FRAGMENT_DATA_OUTPUT as u32..64).any(|bit| fs.outputs_written.test_bit(bit));
    if writes_scalar_color && writes_indexed {
        return Err(LinkError::CrossStageMismatch(
            "the fragment stage writes both the scalar color output and an indexed draw buffer output".into(),
        ));
    }
    Ok(())
}

fn validate_profile_requirements(ctx: &LinkContext, program: &ShaderProgram) -> LinkResult<()> {
    if ctx.profile == ApiProfile::Es && (program.vertex_program.is_none() || program.fragment_program.is_none()) {
        return Err(LinkError::InputInvalid(
            "the ES profile requires both a vertex and a fragment stage".into(),
        ));
    }
    Ok(())
}

fn validate_transform_feedback(ctx: &LinkContext, program: &ShaderProgram) -> LinkResult<()> {
    if program.transform_feedback.varyings.is_empty() {
        return Ok(());
    }
    let mut total_components = 0u32;
    for name in &program.transform_feedback.varyings {
        let slot = program.varyings.find(name).ok_or_else(|| {
            LinkError::UnresolvedSymbol(format!("transform feedback varying '{}' was never linked", name))
        })?;
        total_components += program.varyings.get(slot).size;
    }
    let limit = match program.transform_feedback.mode {
        TransformFeedbackMode::Interleaved => ctx.max_transform_feedback_interleaved_components,
        TransformFeedbackMode::Separate => ctx.max_transform_feedback_separate_components,
    };
    if total_components > limit {
        return Err(LinkError::LimitExceeded(format!(
            "transform feedback captures {} component(s) but the limit is {}",
            total_components, limit
        )));
    }
    Ok(())
}

/// Runs every cross-stage check; the first failure aborts linking.
pub fn validate_program(ctx: &LinkContext, program: &ShaderProgram) -> LinkResult<()> {
    validate_position_written(program)?;
    validate_geometry_requirements(program)?;
    validate_exclusive_fragment_outputs(program)?;
    validate_profile_requirements(ctx, program)?;
    validate_transform_feedback(ctx, program)?;
    Ok(())
}
