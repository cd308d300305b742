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

//! §4.4: vertex attribute slot assignment.
//!
//! Slot 0 is reserved for the attribute named `position`, by convention the
//! one every vertex array object must bind. Every other generic attribute is
//! assigned starting at [`FIRST_GENERIC_ATTRIBUTE`], honoring the host's
//! pre-bindings where given.

use std::collections::{HashMap, HashSet};

use log::debug;
use shaderlink_types::{AttributeEntry, DataType, OperandFile, ShaderProgram, StageKind, StageProgram};

use crate::bases::FIRST_GENERIC_ATTRIBUTE;
use crate::error::{LinkError, LinkResult};
use crate::context::LinkContext;

const POSITION_ATTRIBUTE_NAME: &str = "position";
const RESERVED_POSITION_SLOT: u32 = 0;

struct AttributeUse {
    local_base: u32,
    span: u32,
    name: String,
    size: u32,
    data_type: DataType,
}

fn collect_attribute_uses(prog: &StageProgram) -> Vec<AttributeUse> {
    let mut cursor = FIRST_GENERIC_ATTRIBUTE as u32;
    prog.attributes
        .iter()
        .map(|a| {
            let span = a.data_type.register_span();
            let local_base = cursor;
            cursor += span;
            AttributeUse {
                local_base,
                span,
                name: a.name.clone(),
                size: a.size,
                data_type: a.data_type,
            }
        })
        .collect()
}

/// Resolves attribute slots and rewrites the vertex program's `Input`
/// operands to address them.
pub fn resolve_attributes(ctx: &LinkContext, program: &mut ShaderProgram) -> LinkResult<()> {
    if program.linked_program(StageKind::Vertex).is_none() {
        return Err(LinkError::InputInvalid("attribute resolution requires a vertex stage".into()));
    }

    if let Some(&requested) = program.attribute_bindings.get(POSITION_ATTRIBUTE_NAME) {
        if requested != RESERVED_POSITION_SLOT {
            return Err(LinkError::InputInvalid(format!(
                "'{}' is reserved to slot {} and cannot be rebound to slot {}",
                POSITION_ATTRIBUTE_NAME, RESERVED_POSITION_SLOT, requested
            )));
        }
    }

    let uses = collect_attribute_uses(program.linked_program(StageKind::Vertex).unwrap());
    let position_used = uses.iter().any(|u| u.name == POSITION_ATTRIBUTE_NAME);

    let mut used_slots: HashSet<u32> = HashSet::new();
    let mut base_for: HashMap<String, u32> = HashMap::new();

    if position_used {
        used_slots.insert(RESERVED_POSITION_SLOT);
        base_for.insert(POSITION_ATTRIBUTE_NAME.to_string(), RESERVED_POSITION_SLOT);
    }

    let mut pre_bound: Vec<(&String, u32)> = program
        .attribute_bindings
        .iter()
        .filter(|(name, _)| name.as_str() != POSITION_ATTRIBUTE_NAME)
        .map(|(n, s)| (n, *s))
        .collect();
    pre_bound.sort_by(|a, b| a.0.cmp(b.0));

    for (name, slot) in pre_bound {
        let u = match uses.iter().find(|u| &u.name == name) {
            Some(u) => u,
            None => continue,
        };
        if position_used && slot == RESERVED_POSITION_SLOT {
            return Err(LinkError::InputInvalid(format!(
                "attribute '{}' cannot bind to slot {}, reserved for '{}'",
                name, RESERVED_POSITION_SLOT, POSITION_ATTRIBUTE_NAME
            )));
        }
        reserve_range(ctx, &mut used_slots, slot, u.span, name)?;
        base_for.insert(name.clone(), slot);
    }

    let mut next_slot = FIRST_GENERIC_ATTRIBUTE as u32;
    for u in &uses {
        if base_for.contains_key(&u.name) {
            continue;
        }
        loop {
            if (next_slot..next_slot + u.span).all(|s| !used_slots.contains(&s)) {
                break;
            }
            next_slot += 1;
        }
        reserve_range(ctx, &mut used_slots, next_slot, u.span, &u.name)?;
        base_for.insert(u.name.clone(), next_slot);
        next_slot += u.span;
    }

    debug!("attribute resolution: {} generic attribute slot(s) assigned", base_for.len());

    let mut remap: HashMap<i32, i32> = HashMap::new();
    for u in &uses {
        let base = base_for[&u.name];
        for offset in 0..u.span {
            remap.insert((u.local_base + offset) as i32, (base + offset) as i32);
        }
        program.attributes.push(AttributeEntry {
            name: u.name.clone(),
            size: u.size,
            data_type: u.data_type,
            slot: Some(base),
        });
    }

    let vertex_prog = program.linked_program_mut(StageKind::Vertex).unwrap();
    for instr in &mut vertex_prog.instructions {
        for operand in instr.operands_mut() {
            if operand.file == OperandFile::Input {
                if let Some(&global) = remap.get(&operand.index) {
                    operand.index = global;
                }
            }
        }
    }

    Ok(())
}

fn reserve_range(ctx: &LinkContext, used_slots: &mut HashSet<u32>, base: u32, span: u32, name: &str) -> LinkResult<()> {
    if base + span > ctx.max_vertex_generic_attribs {
        return Err(LinkError::LimitExceeded(format!(
            "attribute '{}' needs slots [{}, {}) but only {} generic attribute slots are available",
            name,
            base,
            base + span,
            ctx.max_vertex_generic_attribs
        )));
    }
    for s in base..base + span {
        if !used_slots.insert(s) {
            return Err(LinkError::SymbolMismatch(format!("attribute slot {} is claimed by more than one attribute", s)));
        }
    }
    Ok(())
}
