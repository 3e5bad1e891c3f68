/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Synthesizes the merged kernel text for one fusion candidate.
//!
//! Every constituent kernel's body is wrapped into a uniquely named helper
//! function whose parameters were renamed with a sequence-global counter,
//! and the generated entry point calls the helpers in original instruction
//! order. Helpers are deduplicated by kernel name, the renamed entry
//! parameters are not: a kernel appearing twice still contributes two
//! parameter groups to the merged signature.

use ahash::AHashSet;

use crate::{
    kernel::{KernelDb, KernelParam},
    OptError,
};

use super::rewrite;

///The five implicit leading parameters every FL kernel takes.
pub(crate) const IMPLICIT_PARAMS: &str = "__global uchar* image, int3 dimensions, int channelCount, float maxValue, __global uchar* channelEnableState";
///The matching forwarding arguments for helper calls.
const IMPLICIT_ARGS: &str = "image, dimensions, channelCount, maxValue, channelEnableState";

///The fused kernel name is derived purely from the ordered constituent
/// names; it doubles as the global deduplication key.
pub(crate) fn fused_name(keys: &[String]) -> String {
    let mut name = String::from("opt");
    for key in keys {
        name.push('_');
        name.push_str(key);
    }
    name
}

#[derive(Debug)]
pub(crate) struct GeneratedKernel {
    pub name: String,
    ///Helper functions followed by the merged entry point.
    pub text: String,
}

///Builds the merged kernel for the ordered key sequence.
pub(crate) fn generate(keys: &[String], db: &dyn KernelDb) -> Result<GeneratedKernel, OptError> {
    let name = fused_name(keys);
    //global across the whole sequence, so renamed identifiers are unique
    //even when the same kernel appears twice
    let mut counter = 0usize;
    let mut emitted_helpers = AHashSet::new();
    let mut helpers = Vec::new();
    let mut call_lines = Vec::new();
    let mut merged_sig = String::from(IMPLICIT_PARAMS);

    for key in keys {
        let info = db
            .kernel(key)
            .ok_or_else(|| OptError::UnknownKernel(key.clone()))?;

        let renamed = info
            .params
            .iter()
            .map(|param| {
                let fresh = format!("{}_mrge_{counter}", param.name);
                counter += 1;
                (param, fresh)
            })
            .collect::<Vec<(&KernelParam, String)>>();

        for (param, fresh) in &renamed {
            merged_sig.push_str(", ");
            merged_sig.push_str(&param.render(fresh));
        }

        if emitted_helpers.insert(info.name.clone()) {
            helpers.push(helper_function(&info.name, &info.source, &renamed)?);
        }

        let mut call = format!("gen_{}({IMPLICIT_ARGS}", info.name);
        for (_, fresh) in &renamed {
            call.push_str(", ");
            call.push_str(fresh);
        }
        call.push_str(");");
        call_lines.push(call);
    }

    let mut text = helpers.join("\n");
    text.push_str(&format!("\n__kernel void {name}({merged_sig})\n{{\n"));
    for line in call_lines {
        text.push_str("    ");
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str("}\n");

    Ok(GeneratedKernel { name, text })
}

///Wraps one kernel's rewritten body into its `gen_<kernel>` helper.
fn helper_function(
    kernel: &str,
    source: &str,
    renamed: &[(&KernelParam, String)],
) -> Result<String, OptError> {
    let mut body = rewrite::kernel_body(source, kernel)?.to_string();
    for (param, fresh) in renamed {
        body = rewrite::replace_token(&body, &param.name, fresh);
    }

    let mut sig = String::from(IMPLICIT_PARAMS);
    for (param, fresh) in renamed {
        sig.push_str(", ");
        sig.push_str(&param.render(fresh));
    }

    Ok(format!("void gen_{kernel}({sig})\n{{{body}}}\n"))
}
