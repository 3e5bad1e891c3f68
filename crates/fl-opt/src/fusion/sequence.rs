/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use fl_ir::{FlArg, FlInstruction};
use smallvec::SmallVec;

///A maximal run of ≥2 consecutive fusable instructions within one
/// function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FusionCandidate {
    ///Index of the run's first instruction.
    pub start: usize,
    ///Number of instructions the run covers.
    pub len: usize,
    ///The constituent instruction keys, in order.
    pub keys: Vec<String>,
    ///All constituent arguments concatenated in order. These become the
    /// arguments of the fused instruction.
    pub args: SmallVec<[FlArg; 4]>,
}

///Scans the instruction list once and collects every maximal fusable run.
/// A non-fusable instruction (or the list end) closes the current run; a
/// closed run shorter than two instructions is discarded.
pub(crate) fn detect(
    instructions: &[FlInstruction],
    is_fusable: impl Fn(&str) -> bool,
) -> Vec<FusionCandidate> {
    let mut candidates = Vec::new();
    let mut run: Option<FusionCandidate> = None;

    for (idx, inst) in instructions.iter().enumerate() {
        if is_fusable(&inst.key) {
            let run = run.get_or_insert_with(|| FusionCandidate {
                start: idx,
                len: 0,
                keys: Vec::new(),
                args: SmallVec::new(),
            });
            run.len += 1;
            run.keys.push(inst.key.clone());
            run.args.extend(inst.args.iter().cloned());
        } else if let Some(closed) = run.take() {
            if closed.len >= 2 {
                candidates.push(closed);
            }
        }
    }

    if let Some(closed) = run {
        if closed.len >= 2 {
            candidates.push(closed);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inst(key: &str, buffer: &str) -> FlInstruction {
        FlInstruction::new(key, [FlArg::Buffer(buffer.to_string())])
    }

    #[test]
    fn singletons_and_non_fusable_instructions_break_runs() {
        let instructions = vec![
            inst("blur_x", "a"),   //singleton, closed by jmp
            inst("jmp", "f"),
            inst("sharpen", "b"),  //run of three
            inst("invert", "c"),
            inst("dilate", "d"),
            inst("jmp", "g"),
            inst("blur_y", "e"),   //trailing run of two
            inst("erode", "f"),
        ];

        let candidates = detect(&instructions, |key| key != "jmp");
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].start, 2);
        assert_eq!(candidates[0].len, 3);
        assert_eq!(candidates[0].keys, ["sharpen", "invert", "dilate"]);
        let args = candidates[0]
            .args
            .iter()
            .map(|a| a.identifier().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(args, ["b", "c", "d"]);

        assert_eq!(candidates[1].start, 6);
        assert_eq!(candidates[1].keys, ["blur_y", "erode"]);
    }

    #[test]
    fn no_fusable_neighbors_no_candidates() {
        let instructions = vec![inst("blur_x", "a"), inst("jmp", "f"), inst("blur_y", "b")];
        assert!(detect(&instructions, |key| key != "jmp").is_empty());
    }
}
