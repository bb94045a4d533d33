use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, SkillEntry};
use crate::template::contact::ContactLine;
use crate::template::dates::{format_date_range, graduation_date};
use crate::template::escape::escape_latex;
use crate::template::{item_list, skill_pairs, RegionBuilder};

/// Harshibar's compact layout: FontAwesome contact icons, upper-case section
/// titles, experience before education.
pub struct Harshibar;

const CONTACT_SEPARATOR: &str = " \\hspace{1pt} $|$\n    \\hspace{1pt} ";

impl RegionBuilder for Harshibar {
    fn heading(&self, contact: &ContactLine) -> String {
        let mut parts = Vec::new();
        if let Some(phone) = &contact.phone {
            parts.push(format!("\\faPhone* \\texttt{{{phone}}}"));
        }
        if let Some(email) = &contact.email {
            parts.push(format!(
                "\\faEnvelope \\hspace{{2pt}} \\href{{{}}}{{\\texttt{{{}}}}}",
                email.url, email.display
            ));
        }
        if let Some(linkedin) = &contact.linkedin {
            parts.push(format!(
                "\\faLinkedin \\hspace{{2pt}} \\href{{{}}}{{\\texttt{{{}}}}}",
                linkedin.url, linkedin.display
            ));
        }
        if let Some(website) = &contact.website {
            parts.push(format!(
                "\\faGlobe \\hspace{{2pt}} \\href{{{}}}{{\\texttt{{{}}}}}",
                website.url, website.display
            ));
        }

        let mut out = format!("\\begin{{center}}\n    \\textbf{{\\Huge {}}}", contact.name);
        if !parts.is_empty() {
            out.push_str(&format!(
                " \\\\ \\vspace{{5pt}}\n    \\small {}",
                parts.join(CONTACT_SEPARATOR)
            ));
        }
        out.push_str("\n    \\\\ \\vspace{-3pt}\n\\end{center}");
        out
    }

    fn education(&self, entries: &[EducationEntry]) -> String {
        let mut body = String::new();
        for edu in entries.iter().filter(|e| !e.institution.trim().is_empty()) {
            body.push_str("    \\resumeSubheading\n");
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(edu.institution.trim()),
                graduation_date(edu)
            ));
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(&edu.display_degree()),
                escape_latex(edu.location.trim())
            ));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------EDUCATION-----------\n\\section {{EDUCATION}}\n  \\resumeSubHeadingListStart\n{body}  \\resumeSubHeadingListEnd"
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
                escape_latex(exp.company.trim()),
                format_date_range(exp.start.as_deref(), exp.end.as_deref())
            ));
            body.push_str(&format!(
                "      {{{}}}{{{}}}\n",
                escape_latex(exp.role.trim()),
                escape_latex(exp.location.trim())
            ));
            body.push_str(&item_list(&exp.bullets, "      "));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------EXPERIENCE-----------\n\\section{{EXPERIENCE}}\n  \\resumeSubHeadingListStart\n\n{body}  \\resumeSubHeadingListEnd"
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
            body.push_str(&format!("          {{{heading}}} {{}}\n"));
            body.push_str(&item_list(&project.bullets, "          "));
        }
        if body.is_empty() {
            return body;
        }
        format!(
            "%-----------PROJECTS-----------\n\n\\section{{PROJECTS}}\n    \\resumeSubHeadingListStart\n{body}    \\resumeSubHeadingListEnd"
        )
    }

    fn skills(&self, entries: &[SkillEntry]) -> String {
        let lines: Vec<String> = skill_pairs(entries)
            .into_iter()
            .map(|(category, skills)| format!("     \\textbf{{{category}}} {{: {skills}}}"))
            .collect();
        if lines.is_empty() {
            return String::new();
        }
        format!(
            "%-----------PROGRAMMING SKILLS-----------\n\\section{{SKILLS}}\n \\begin{{itemize}}[leftmargin=0in, label={{}}]\n    \\small{{\\item{{\n{}\\vspace{{2pt}} \\\\\n    }}}}\n \\end{{itemize}}",
            lines.join(" \\\\\n")
        )
    }
}
