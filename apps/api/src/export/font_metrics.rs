//! Static font-metric table for Helvetica, the PDF base-14 font used by the exporter.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe Helvetica AFM. The table covers ASCII 0x20..=0x7E (95 printable
//! characters); index = (char as usize) - 32. Anything else falls back to
//! `average_char_width`.

/// Static character-width table.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Greedy word-wrap of `text` at `max_width_em`.
    ///
    /// Explicit newlines start a new line; a blank input line stays a blank output
    /// line. A single word wider than the line is broken across lines by character.
    pub fn wrap_text(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.lines() {
            self.wrap_paragraph(paragraph, max_width_em, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width: f32, lines: &mut Vec<String>) {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word);
            let space_w = if current.is_empty() { 0.0 } else { self.space_width };

            if current_width + space_w + word_w <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_w <= max_width {
                current.push_str(word);
                current_width = word_w;
            } else {
                // Overlong word (URLs, long identifiers): hard-break by character.
                for c in word.chars() {
                    let c_w = self.char_width(c);
                    if !current.is_empty() && current_width + c_w > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += c_w;
                }
            }
        }

        // Push the final (possibly partial or blank) line.
        lines.push(current);
    }
}

/// Helvetica (regular).
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        // "Go" = G(0.778) + o(0.556)
        assert!((HELVETICA.measure_str("Go") - 1.334).abs() < 1e-4);
        assert!((HELVETICA.measure_str(" ") - HELVETICA.space_width).abs() < 1e-6);
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        assert!((HELVETICA.measure_str("é") - HELVETICA.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(HELVETICA.wrap_text("Rust, Go", 40.0), vec!["Rust, Go"]);
    }

    #[test]
    fn test_wrapped_lines_fit_width() {
        let text = "Quantify the impact of every role with concrete numbers. ".repeat(12);
        let lines = HELVETICA.wrap_text(&text, 30.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HELVETICA.measure_str(line) <= 30.0 + 1e-4, "line too wide: {line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overlong_word_is_hard_broken() {
        let url = "https://example.com/".to_string() + &"a".repeat(200);
        let lines = HELVETICA.wrap_text(&url, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
        for line in &lines {
            assert!(HELVETICA.measure_str(line) <= 20.0 + 1e-4);
        }
    }

    #[test]
    fn test_newlines_are_preserved() {
        let lines = HELVETICA.wrap_text("First\n\nThird", 40.0);
        assert_eq!(lines, vec!["First", "", "Third"]);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(HELVETICA.wrap_text("", 40.0).is_empty());
    }
}
