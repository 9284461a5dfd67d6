use crate::SimulationSummary;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::mpsc::Receiver;

fn format_summaries(summaries: HashMap<usize, SimulationSummary>) -> HashMap<usize, String> {
    const width: usize = 80;
    summaries
        .into_iter()
        .map(|(id, summary)| {
            let sim_num = format!("simulation #{}", id);
            let header = format!("{:-^width$}\n", sim_num);
            (id, format!("{}{}{}\n", header, summary, "-".repeat(width)))
        })
        .collect::<HashMap<usize, String>>()
}

/// A public function that drains simulation summaries off `receiver`, merges
/// them per simulation id and writes the formatted blocks to `writer`. A
/// `(None, id)` message marks simulation `id` as finished; once every id in
/// `ids` has finished the output is written.
pub fn write_summaries(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
    mut writer: impl Write,
) -> std::io::Result<()> {
    let mut summaries: HashMap<usize, SimulationSummary> = HashMap::new();
    while let Ok((cur_summary, id)) = receiver.recv() {
        if let Some(cur_sum) = cur_summary {
            if let Some(summary) = summaries.get_mut(&id) {
                summary.wins += cur_sum.wins;
                summary.losses += cur_sum.losses;
                summary.winnings += cur_sum.winnings;
                summary.jackpots += cur_sum.jackpots;
                summary.early_endings += cur_sum.early_endings;
                summary.num_rounds += cur_sum.num_rounds;
            } else {
                summaries.insert(id, cur_sum);
            }
        } else {
            ids.remove(&id);
            if ids.is_empty() {
                // We have no more stats to process
                break;
            }
        }
    }

    // Get summaries into nicely formatted strings, and write to writer
    let formatted_summaries = format_summaries(summaries);
    for i in 1..=formatted_summaries.len() {
        if let Some(block) = formatted_summaries.get(&i) {
            writer.write_all(block.as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::iter::FromIterator;
    use std::sync::mpsc;

    fn summary(label: &str, wins: i32) -> SimulationSummary {
        SimulationSummary {
            wins,
            losses: 10 - wins,
            winnings: -3,
            jackpots: 0,
            early_endings: 0,
            num_rounds: 10,
            label: label.to_string(),
        }
    }

    #[test]
    fn summaries_are_merged_per_id_and_written_once_all_finish() {
        let (sender, receiver) = mpsc::channel();
        sender.send((Some(summary("flat 1", 3)), 1)).unwrap();
        sender.send((Some(summary("flat 1", 4)), 1)).unwrap();
        sender.send((Some(summary("martingale 1", 2)), 2)).unwrap();
        sender.send((None, 1)).unwrap();
        sender.send((None, 2)).unwrap();

        let mut out = Vec::new();
        let ids = HashSet::from_iter(1..=2);
        write_summaries(receiver, ids, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("simulation #1"));
        assert!(text.contains("simulation #2"));
        assert!(text.contains("flat 1"));
        assert!(text.contains("martingale 1"));
        // Two id-1 summaries merged: 7 wins over 20 rounds
        assert!(text.contains("7"));
    }
}
