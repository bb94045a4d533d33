/// Escapes the ten LaTeX control characters in free text.
///
/// Substitution happens per character, so a replacement is never rescanned:
/// `\` becomes `\textbackslash{}` and its braces stay literal. Escaping already
/// escaped text compounds (`\&` → `\textbackslash{}\&`).
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '$' => out.push_str(r"\$"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '_' => out.push_str(r"\_"),
            '~' => out.push_str(r"\textasciitilde{}"),
            other => out.push(other),
        }
    }
    out
}
