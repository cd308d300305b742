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

use crate::program::StageProgram;
use crate::stage::StageKind;

/// A single compiled unit handed to the linker by the compiler front-end:
/// one source text plus its compiled `StageProgram`, if compilation
/// succeeded. Units of the same stage are candidates for the main-shader
/// selection pass (§4.1); more than one unit may exist per stage when the
/// front-end compiles separate translation units for a stage.
#[derive(Clone, Debug)]
pub struct CompiledUnit {
    pub stage: StageKind,
    pub source: String,
    pub compiled: bool,
    pub defines_main: bool,
    pub has_unresolved_refs: bool,
    pub program: Option<StageProgram>,
}

impl CompiledUnit {
    pub fn new(stage: StageKind, source: impl Into<String>, program: StageProgram) -> CompiledUnit {
        CompiledUnit {
            stage,
            source: source.into(),
            compiled: true,
            defines_main: true,
            has_unresolved_refs: false,
            program: Some(program),
        }
    }

    /// A unit that defines `main` and has no unresolved references is
    /// self-contained and can be linked directly without concatenation.
    pub fn is_self_contained(&self) -> bool {
        self.compiled && self.defines_main && !self.has_unresolved_refs
    }

    pub fn with_defines_main(mut self, defines_main: bool) -> CompiledUnit {
        self.defines_main = defines_main;
        self
    }

    pub fn with_unresolved_refs(mut self, has_unresolved_refs: bool) -> CompiledUnit {
        self.has_unresolved_refs = has_unresolved_refs;
        self
    }
}
