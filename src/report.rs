//! Plain-text rendering of analysis outcomes.

use std::fmt::Write;

use crate::analysis::SubstructureOutcome;

/// Render a textual summary of every substructure's analysis outcome.
///
/// Member forces are tagged `T` (tension) or `C` (compression); reactions are
/// listed per support joint. Failed components report their error in place of
/// results.
#[must_use]
pub fn render_report(outcomes: &[SubstructureOutcome]) -> String {
    let mut output = String::new();

    writeln!(&mut output, "=== STRUCTURAL ANALYSIS ===").expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Total independent structures: {}\n",
        outcomes.len()
    )
    .expect("writing to string cannot fail");

    for (index, outcome) in outcomes.iter().enumerate() {
        let substructure = &outcome.substructure;
        writeln!(&mut output, "========== STRUCTURE {} ==========", index + 1)
            .expect("writing to string cannot fail");
        writeln!(&mut output, "Joints: {}", substructure.joint_count())
            .expect("writing to string cannot fail");
        writeln!(&mut output, "Members: {}", substructure.member_count())
            .expect("writing to string cannot fail");
        writeln!(&mut output, "Supports: {}\n", substructure.supports.len())
            .expect("writing to string cannot fail");

        let result = match &outcome.outcome {
            Ok(result) => result,
            Err(error) => {
                writeln!(&mut output, "ERROR: {error}\n").expect("writing to string cannot fail");
                continue;
            }
        };

        if !substructure.loads.is_empty() {
            writeln!(&mut output, "--- APPLIED LOADS ---").expect("writing to string cannot fail");
            let mut loaded: Vec<_> = substructure.loads.iter().collect();
            loaded.sort_by_key(|(&joint, _)| joint);
            for (joint, load) in loaded {
                writeln!(
                    &mut output,
                    "J{joint}: ({:.2}, {:.2}, {:.2}) N",
                    load.x, load.y, load.z
                )
                .expect("writing to string cannot fail");
            }
        }

        writeln!(&mut output, "--- MEMBER FORCES ---").expect("writing to string cannot fail");
        for (member, force) in result.member_forces.iter().enumerate() {
            let kind = if *force > 0.0 { "T" } else { "C" };
            writeln!(&mut output, "M{member}: {force:.2} N ({kind})")
                .expect("writing to string cannot fail");
        }

        writeln!(&mut output, "--- REACTIONS ---").expect("writing to string cannot fail");
        let mut reactions: Vec<_> = result.reactions.iter().collect();
        reactions.sort_by_key(|(&joint, _)| joint);
        for (joint, reaction) in reactions {
            writeln!(
                &mut output,
                "J{joint}: ({:.2}, {:.2}, {:.2}) N",
                reaction.x, reaction.y, reaction.z
            )
            .expect("writing to string cannot fail");
        }
        output.push('\n');
    }

    output
}
