use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, SkillEntry};
use crate::template::contact::ContactLine;
use crate::template::dates::{format_date_range, graduation_date};
use crate::template::escape::escape_latex;
use crate::template::{item_list, skill_pairs, RegionBuilder};

/// Jake Gutierrez's single-column resume: small caps name, underlined links,
/// education first.
pub struct Jake;

const GLYPH_TO_UNICODE: &str = r"\input{glyphtounicode}";

impl RegionBuilder for Jake {
    fn prepare_skeleton(&self, skeleton: &str) -> String {
        // glyphtounicode is missing from minimal TeX installs
        skeleton.replace(GLYPH_TO_UNICODE, &format!("% {GLYPH_TO_UNICODE}"))
    }

    fn heading(&self, contact: &ContactLine) -> String {
        let mut parts = Vec::new();
        if let Some(phone) = &contact.phone {
            parts.push(phone.clone());
        }
        if let Some(email) = &contact.email {
            parts.push(format!(
                "\\href{{{}}}{{\\underline{{{}}}}}",
                email.url, email.display
            ));
        }
        for link in [&contact.linkedin, &contact.website].into_iter().flatten() {
            parts.push(format!(
                "\\href{{{}}}{{\\underline{{{}}}}}",
                link.url, link.display
            ));
        }

        let mut out = format!("\\begin{{center}}\n    \\textbf{{\\Huge \\scshape {}}}", contact.name);
        if !parts.is_empty() {
            out.push_str(&format!(
                " \\\\ \\vspace{{1pt}}\n    \\small {}",
                parts.join(" $|$ ")
            ));
        }
        out.push_str("\n\\end{center}");
        out
    }

    fn education(&self, entries: &[EducationEntry]) -> String {
        let mut body = String::new();
        for edu in entries.iter().filter(|e| !e.institution.trim().is_empty()) {
            body.push_str("    \\resumeSubheading\n");
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(edu.institution.trim()),
                escape_latex(edu.location.trim())
            ));
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(&edu.display_degree()),
                graduation_date(edu)
            ));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------EDUCATION-----------\n\\section{{Education}}\n  \\resumeSubHeadingListStart\n{body}  \\resumeSubHeadingListEnd"
        )
    }

    fn experience(&self, entries: &[ExperienceEntry]) -> String {
        let mut body = String::new();
        for exp in entries
            .iter()
            .filter(|e| !e.company.trim().is_empty() && !e.role.trim().is_empty())
        {
            body.push_str("    \\resumeSubheading\n");
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(exp.role.trim()),
                format_date_range(exp.start.as_deref(), exp.end.as_deref())
            ));
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(exp.company.trim()),
                escape_latex(exp.location.trim())
            ));
            body.push_str(&item_list(&exp.bullets, "      "));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------EXPERIENCE-----------\n\\section{{Experience}}\n  \\resumeSubHeadingListStart\n\n{body}  \\resumeSubHeadingListEnd"
        )
    }

    fn projects(&self, entries: &[ProjectEntry]) -> String {
        let mut body = String::new();
        for project in entries.iter().filter(|p| !p.title.trim().is_empty()) {
            let mut heading = format!("\\textbf{{{}}}", escape_latex(project.title.trim()));
            let skills = project.skills.trim();
            if !skills.is_empty() {
                heading.push_str(&format!(" $|$ \\emph{{{}}}", escape_latex(skills)));
            }
            body.push_str("      \\resumeProjectHeading\n");
            body.push_str(&format!("          {{{heading}}}{{}}\n"));
            body.push_str(&item_list(&project.bullets, "          "));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------PROJECTS-----------\n\\section{{Projects}}\n    \\resumeSubHeadingListStart\n{body}    \\resumeSubHeadingListEnd"
        )
    }

    fn skills(&self, entries: &[SkillEntry]) -> String {
        let lines: Vec<String> = skill_pairs(entries)
            .into_iter()
            .map(|(category, skills)| format!("     \\textbf{{{category}}}{{: {skills}}}"))
            .collect();
        if lines.is_empty() {
            return String::new();
        }
        format!(
            "%-----------PROGRAMMING SKILLS-----------\n\\section{{Technical Skills}}\n \\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n    \\small{{\\item{{\n{}\n    }}}}\n \\end{{itemize}}",
            lines.join(" \\\\\n")
        )
    }
}
