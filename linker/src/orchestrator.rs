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

//! §4.7: the link pipeline driving every pass in order.
//!
//! `INIT -> SELECT_MAIN -> CLONE -> MERGE_VARYINGS -> MERGE_UNIFORMS ->
//! RESOLVE_ATTRIBUTES -> RECOMPUTE -> VALIDATE -> NOTIFY -> DONE`. Any step
//! can fail; the first failure aborts the whole attempt and publishes its
//! message to `ShaderProgram::info_log`.

use log::{error, info};
use shaderlink_types::{ShaderProgram, StageKind, StageProgram};

use crate::attribute_resolve::resolve_attributes;
use crate::context::{DriverNotify, ExternalCompiler, LinkContext};
use crate::error::{LinkError, LinkResult};
use crate::metadata::recompute_metadata;
use crate::select_main::select_main_shader;
use crate::uniform_merge::merge_uniforms;
use crate::validate::validate_program;
use crate::varying_merge::merge_varyings;

const PIPELINE_STAGES: [StageKind; 3] = [StageKind::Vertex, StageKind::Geometry, StageKind::Fragment];

fn select_and_clone(program: &mut ShaderProgram, compiler: &dyn ExternalCompiler) -> LinkResult<()> {
    let mut selected: Vec<(StageKind, StageProgram)> = Vec::new();
    for &stage in &PIPELINE_STAGES {
        if program.has_stage(stage) {
            selected.push((stage, select_main_shader(program, stage, compiler)?));
        }
    }
    for (stage, sp) in selected {
        program.set_linked_program(stage, sp.clone_for_link());
    }
    Ok(())
}

fn notify_driver(program: &ShaderProgram, driver: &mut dyn DriverNotify) -> LinkResult<()> {
    for &stage in &PIPELINE_STAGES {
        if let Some(sp) = program.linked_program(stage) {
            if !driver.notify(stage, sp) {
                return Err(LinkError::DriverRejected(format!("the driver rejected the {} stage", stage)));
            }
        }
    }
    Ok(())
}

fn link_inner(
    ctx: &LinkContext,
    program: &mut ShaderProgram,
    compiler: &dyn ExternalCompiler,
    driver: &mut dyn DriverNotify,
) -> LinkResult<()> {
    info!("link: INIT");
    program.reset_for_link();

    info!("link: SELECT_MAIN / CLONE");
    select_and_clone(program, compiler)?;

    info!("link: MERGE_VARYINGS");
    merge_varyings(ctx, program)?;

    info!("link: MERGE_UNIFORMS");
    merge_uniforms(ctx, program)?;

    if program.vertex_program.is_some() {
        info!("link: RESOLVE_ATTRIBUTES");
        resolve_attributes(ctx, program)?;
    }

    info!("link: RECOMPUTE");
    recompute_metadata(ctx, program);

    info!("link: VALIDATE");
    validate_program(ctx, program)?;

    info!("link: NOTIFY");
    notify_driver(program, driver)?;

    Ok(())
}

/// Links `program`'s compiled units into one program, mutating it in place.
/// On success `program.link_status` is `true` and every stage's
/// `linked_program` is populated; on failure `link_status` is `false` and
/// `info_log` carries the diagnostic.
pub fn link(
    ctx: &LinkContext,
    program: &mut ShaderProgram,
    compiler: &dyn ExternalCompiler,
    driver: &mut dyn DriverNotify,
) -> LinkResult<()> {
    match link_inner(ctx, program, compiler, driver) {
        Ok(()) => {
            program.link_status = true;
            program.info_log = None;
            info!("link: DONE");
            Ok(())
        }
        Err(e) => {
            error!("link failed: {}", e);
            program.link_status = false;
            program.info_log = Some(e.to_string());
            Err(e)
        }
    }
}
