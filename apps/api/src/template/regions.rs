//! Named regions of a template skeleton and the splice that replaces them.
//!
//! Each region is delimited by fixed markers in the `.tex` source: the heading
//! is the first `center` environment, list sections start at their
//! `%-----------NAME-----------` comment and end at the list terminator.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Heading,
    Education,
    Experience,
    Projects,
    Skills,
}

/// Optional trailing whitespace and blank lines, consumed when a region is
/// removed so no gap is left behind.
const TRAILING_BLANK_LINES: &str = r"[ \t]*\n?(?:[ \t]*\n)*";

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{center\}.*?\\end\{center\}").unwrap());
static RE_EDUCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%-----------EDUCATION-----------.*?\\resumeSubHeadingListEnd").unwrap()
});
static RE_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%-----------EXPERIENCE-----------.*?\\resumeSubHeadingListEnd").unwrap()
});
static RE_PROJECTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%-----------PROJECTS-----------.*?\\resumeSubHeadingListEnd").unwrap()
});
static RE_SKILLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%-----------PROGRAMMING SKILLS-----------.*?\\end\{itemize\}").unwrap()
});

static RE_REMOVALS: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [&*RE_HEADING, &*RE_EDUCATION, &*RE_EXPERIENCE, &*RE_PROJECTS, &*RE_SKILLS]
        .map(|re| Regex::new(&format!("{}{TRAILING_BLANK_LINES}", re.as_str())).unwrap())
});

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Heading,
        Region::Education,
        Region::Experience,
        Region::Projects,
        Region::Skills,
    ];

    fn index(self) -> usize {
        match self {
            Region::Heading => 0,
            Region::Education => 1,
            Region::Experience => 2,
            Region::Projects => 3,
            Region::Skills => 4,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Region::Heading => &RE_HEADING,
            Region::Education => &RE_EDUCATION,
            Region::Experience => &RE_EXPERIENCE,
            Region::Projects => &RE_PROJECTS,
            Region::Skills => &RE_SKILLS,
        }
    }
}

/// Replaces each region of `markup` with its body, or removes it together
/// with the blank lines that follow when the body is empty. Regions whose
/// markers are missing leave the markup unchanged.
///
/// Every span is located in the untouched `markup` before anything is
/// inserted, so inserted bodies are never rescanned for markers.
pub fn splice_regions(markup: &str, bodies: &[(Region, String)]) -> String {
    let mut spans: Vec<(usize, usize, &str)> = Vec::new();
    for (region, body) in bodies {
        let body = body.trim_end();
        let pattern = if body.is_empty() {
            &RE_REMOVALS[region.index()]
        } else {
            region.pattern()
        };
        spans.extend(pattern.find_iter(markup).map(|m| (m.start(), m.end(), body)));
    }
    spans.sort_by_key(|&(start, _, _)| start);

    let mut out = String::with_capacity(markup.len());
    let mut cursor = 0;
    for (start, end, body) in spans {
        // Overlapping matches can only come from malformed skeletons; the
        // earlier region wins.
        if start < cursor {
            continue;
        }
        out.push_str(&markup[cursor..start]);
        out.push_str(body);
        cursor = end;
    }
    out.push_str(&markup[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = "\\begin{document}\n\
\\begin{center}\n    OLD HEADING\n\\end{center}\n\
\n\
%-----------EDUCATION-----------\n\\section{Education}\n  \\resumeSubHeadingListStart\n  \\resumeSubHeadingListEnd\n\
\n\
%-----------EXPERIENCE-----------\n\\section{Experience}\n  \\resumeSubHeadingListStart\n  \\resumeSubHeadingListEnd\n\
\n\
\\end{document}\n";

    #[test]
    fn test_replacement_keeps_dollar_signs_literal() {
        let out = splice_regions(
            SKELETON,
            &[(Region::Heading, "\\begin{center}\n  a $|$ b\n\\end{center}".to_string())],
        );
        assert!(out.contains("a $|$ b"));
        assert!(!out.contains("OLD HEADING"));
    }

    #[test]
    fn test_empty_body_removes_region_and_blank_lines() {
        let out = splice_regions(SKELETON, &[(Region::Experience, String::new())]);
        assert!(!out.contains("EXPERIENCE"));
        assert!(!out.contains("\\section{Experience}"));
        assert!(out.contains("\\resumeSubHeadingListEnd\n\n\\end{document}"));
    }

    #[test]
    fn test_region_match_is_lazy() {
        let out = splice_regions(SKELETON, &[(Region::Education, "EDU BODY".to_string())]);
        assert!(out.contains("EDU BODY\n\n%-----------EXPERIENCE"));
        assert!(out.contains("\\section{Experience}"));
    }

    #[test]
    fn test_missing_markers_leave_markup_untouched() {
        let out = splice_regions(SKELETON, &[(Region::Skills, String::new())]);
        assert_eq!(out, SKELETON);
        let out = splice_regions(SKELETON, &[(Region::Projects, "PROJECTS".to_string())]);
        assert_eq!(out, SKELETON);
    }

    #[test]
    fn test_inserted_bodies_are_not_rescanned_for_markers() {
        let hostile = "%-----------EXPERIENCE-----------\n\\resumeSubHeadingListEnd";
        let out = splice_regions(
            SKELETON,
            &[
                (Region::Education, hostile.to_string()),
                (Region::Experience, "EXP BODY".to_string()),
            ],
        );
        assert!(out.contains(hostile));
        assert!(out.contains("EXP BODY"));
        assert_eq!(out.matches("EXP BODY").count(), 1);
    }
}
