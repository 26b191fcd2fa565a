//! Line-scan heuristics for the experience, education, and certification
//! sections of a résumé. Each scan caps its output and preserves document
//! order.

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "professional experience",
];

const JOB_TITLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "analyst",
    "manager",
    "specialist",
    "consultant",
];

/// Headers that close an open experience section.
const SECTION_BREAKERS: &[&str] = &["education", "skills", "certification"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "bachelor",
    "master",
    "phd",
    "degree",
    "education",
];

const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified",
    "certification",
    "certificate",
    "aws certified",
    "microsoft certified",
    "cisco",
    "comptia",
];

const MAX_EXPERIENCE_ENTRIES: usize = 10;
const MAX_EDUCATION_ENTRIES: usize = 5;
const MAX_CERTIFICATION_ENTRIES: usize = 10;

/// Collects likely work-experience lines. An experience header opens the
/// section; education/skills/certification headers close it; lines with a
/// job-title keyword are collected even outside an open section. Only lines
/// strictly between 10 and 100 characters qualify.
pub fn extract_experience(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut in_section = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let lower = line.to_lowercase();

        if EXPERIENCE_HEADERS.iter().any(|h| lower.contains(h)) {
            in_section = true;
            continue;
        }

        if in_section || JOB_TITLE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            let len = line.chars().count();
            if len > 10 && len < 100 {
                entries.push(line.to_string());
            }
        }

        if SECTION_BREAKERS.iter().any(|b| lower.contains(b)) {
            in_section = false;
        }
    }

    entries.truncate(MAX_EXPERIENCE_ENTRIES);
    entries
}

/// Any line mentioning an education keyword, strictly between 5 and 150
/// characters, capped at 5 entries.
pub fn extract_education(text: &str) -> Vec<String> {
    collect_keyword_lines(text, EDUCATION_KEYWORDS, 5, 150, MAX_EDUCATION_ENTRIES)
}

/// Any line mentioning a certification keyword, strictly between 5 and 100
/// characters, capped at 10 entries.
pub fn extract_certifications(text: &str) -> Vec<String> {
    collect_keyword_lines(text, CERTIFICATION_KEYWORDS, 5, 100, MAX_CERTIFICATION_ENTRIES)
}

fn collect_keyword_lines(
    text: &str,
    keywords: &[&str],
    min_len: usize,
    max_len: usize,
    cap: usize,
) -> Vec<String> {
    let mut entries = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        let lower = line.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k)) {
            let len = line.chars().count();
            if len > min_len && len < max_len {
                entries.push(line.to_string());
            }
        }
    }
    entries.truncate(cap);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Doe

Professional Experience
Acme Corp - Senior Backend Developer
Built the payments platform over four years
short one
Education
BSc Computer Science, State University
Certifications
AWS Certified Solutions Architect
";

    #[test]
    fn test_experience_collected_inside_section() {
        let exp = extract_experience(RESUME);
        assert!(exp.contains(&"Acme Corp - Senior Backend Developer".to_string()));
        assert!(exp.contains(&"Built the payments platform over four years".to_string()));
    }

    #[test]
    fn test_short_lines_skipped() {
        let exp = extract_experience(RESUME);
        assert!(!exp.iter().any(|l| l == "short one"));
    }

    #[test]
    fn test_education_header_closes_experience_section() {
        let exp = extract_experience(RESUME);
        assert!(
            !exp.iter().any(|l| l.contains("State University")),
            "lines after the Education header are not experience"
        );
    }

    #[test]
    fn test_job_title_line_collected_outside_section() {
        let exp = extract_experience("Freelance software engineer since 2019\nirrelevant line");
        assert_eq!(exp, vec!["Freelance software engineer since 2019"]);
    }

    #[test]
    fn test_experience_capped_at_ten() {
        let text = std::iter::once("Work History".to_string())
            .chain((0..15).map(|i| format!("Developer role number {i} at some company")))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_experience(&text).len(), 10);
    }

    #[test]
    fn test_education_lines() {
        // The "Education" header line itself carries a keyword and survives
        // the length bounds, so it is collected too.
        let edu = extract_education(RESUME);
        assert_eq!(
            edu,
            vec!["Education", "BSc Computer Science, State University"]
        );
    }

    #[test]
    fn test_education_capped_at_five() {
        let text = (0..8)
            .map(|i| format!("Bachelor of Arts number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(extract_education(&text).len(), 5);
    }

    #[test]
    fn test_certifications_found() {
        let certs = extract_certifications(RESUME);
        assert_eq!(
            certs,
            vec!["Certifications", "AWS Certified Solutions Architect"]
        );
    }

    #[test]
    fn test_certification_length_bounds_are_strict() {
        // Exactly 5 chars fails the > 5 bound
        assert!(extract_certifications("cisco").is_empty());
        assert_eq!(
            extract_certifications("Cisco CCNA"),
            vec!["Cisco CCNA".to_string()]
        );
    }
}
