/*!
 * Fixed-width line reflow for plain-text delivery.
 *
 * Repacks caption text into display lines close to a target width without
 * altering wording: the two pause marks used as break hints are dropped,
 * everything else is preserved in order.
 */

use log::trace;

/// Pause punctuation consumed as break hints, never rendered
const BREAK_MARKS: [char; 2] = ['。', '、'];

/// Characters an output line may run past the target before a break is forced
pub const LINE_SLACK: usize = 4;

/// Default target line width, tuned for vertical CJK captions
pub const DEFAULT_TARGET_LENGTH: usize = 14;

/// Repacks text into fixed-width display lines
pub struct ReflowFormatter {
    /// Preferred output line length in characters
    target_length: usize,
}

impl Default for ReflowFormatter {
    fn default() -> Self {
        ReflowFormatter::new(DEFAULT_TARGET_LENGTH)
    }
}

impl ReflowFormatter {
    /// Create a formatter with an explicit target line length
    pub fn new(target_length: usize) -> Self {
        ReflowFormatter { target_length }
    }

    /// Reflow `text` into display lines.
    ///
    /// Source lines are processed independently and blank ones dropped.
    /// Within a line, the text between pause marks forms chunks which are
    /// packed greedily: a chunk is appended when doing so keeps the line at
    /// most `target_length + 4` characters and no further from the target
    /// than leaving the line as is; otherwise the line is closed and the
    /// chunk starts a new one.
    pub fn reflow(&self, text: &str) -> Vec<String> {
        let max_length = self.target_length + LINE_SLACK;
        let mut output = Vec::new();

        for source_line in text.split('\n') {
            let source_line = source_line.trim();
            if source_line.is_empty() {
                continue;
            }

            let mut current = String::new();
            let mut current_length = 0usize;

            for chunk in Self::split_chunks(source_line) {
                let chunk_length = chunk.chars().count();

                if current.is_empty() {
                    current = chunk;
                    current_length = chunk_length;
                    continue;
                }

                let combined_length = current_length + chunk_length;

                if combined_length > max_length {
                    trace!("Forced break at {} chars: {}", current_length, current);
                    output.push(std::mem::take(&mut current));
                    current = chunk;
                    current_length = chunk_length;
                } else if self.target_length.abs_diff(combined_length)
                    <= self.target_length.abs_diff(current_length)
                {
                    current.push_str(&chunk);
                    current_length = combined_length;
                } else {
                    output.push(std::mem::take(&mut current));
                    current = chunk;
                    current_length = chunk_length;
                }
            }

            // Output lines never span source lines
            if !current.is_empty() {
                output.push(current);
            }
        }

        output
    }

    /// Reflow `text` and join the lines for plain-text delivery
    pub fn reflow_to_string(&self, text: &str) -> String {
        self.reflow(text).join("\n")
    }

    /// Split a source line into punctuation-free chunks at the break marks
    fn split_chunks(line: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for ch in line.chars() {
            if BREAK_MARKS.contains(&ch) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    chunks.push(trimmed.to_string());
                }
                current.clear();
            } else {
                current.push(ch);
            }
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        chunks
    }
}
