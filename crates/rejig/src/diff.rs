//! Minimal line diff for `run --diff`.
//!
//! Recipe edits are localized, so a single hunk bounded by the common prefix
//! and suffix of the two versions reads well without a full LCS diff.

use nu_ansi_term::Color;
use std::fmt::Write;
use std::path::Path;

/// Render a unified-style diff of one file, or None when the texts match.
pub fn render(path: &Path, original: &str, rewritten: &str, colors: bool) -> Option<String> {
    if original == rewritten {
        return None;
    }
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = rewritten.lines().collect();

    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let removed = &old[prefix..old.len() - suffix];
    let added = &new[prefix..new.len() - suffix];

    let paint = |color: Color, text: String| {
        if colors {
            color.paint(text).to_string()
        } else {
            text
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "--- {}", path.display());
    let _ = writeln!(out, "+++ {} (rewritten)", path.display());
    let _ = writeln!(
        out,
        "@@ -{},{} +{},{} @@",
        prefix + 1,
        removed.len(),
        prefix + 1,
        added.len()
    );
    for line in removed {
        let _ = writeln!(out, "{}", paint(Color::Red, format!("-{line}")));
    }
    for line in added {
        let _ = writeln!(out, "{}", paint(Color::Green, format!("+{line}")));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn single_line_change_is_one_hunk() {
        let path = PathBuf::from("A.java");
        let out = render(
            &path,
            "class A {\n    int x = 0;\n}\n",
            "class A {\n    int x;\n}\n",
            false,
        )
        .unwrap();
        assert!(out.contains("@@ -2,1 +2,1 @@"));
        assert!(out.contains("-    int x = 0;"));
        assert!(out.contains("+    int x;"));
    }

    #[test]
    fn identical_texts_render_nothing() {
        let path = PathBuf::from("A.java");
        assert!(render(&path, "same\n", "same\n", false).is_none());
    }

    #[test]
    fn line_removal_renders_empty_added_side() {
        let path = PathBuf::from("A.java");
        let out = render(&path, "a\nb\nc\n", "a\nc\n", false).unwrap();
        assert!(out.contains("-b"));
        assert!(!out.contains("+b"));
    }
}
