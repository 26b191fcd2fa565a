//! Skill detection against a fixed technology vocabulary.

/// Vocabulary of recognized skills. Detection output preserves this order,
/// not document order.
const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "javascript",
    "python",
    "java",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "typescript",
    "kotlin",
    "scala",
    "r",
    "matlab",
    "perl",
    "lua",
    "dart",
    // Web technologies
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "nodejs",
    "express",
    "django",
    "flask",
    "spring",
    "asp.net",
    "laravel",
    "symfony",
    "rails",
    "bootstrap",
    "tailwind",
    "jquery",
    "webpack",
    "babel",
    "sass",
    "less",
    // Databases
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "sqlite",
    "oracle",
    "sql server",
    "dynamodb",
    "cassandra",
    "elasticsearch",
    "neo4j",
    // Cloud & DevOps
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "terraform",
    "ansible",
    "puppet",
    "chef",
    "vagrant",
    "git",
    "github",
    "gitlab",
    "bitbucket",
    // Tools & platforms
    "linux",
    "ubuntu",
    "centos",
    "nginx",
    "apache",
    "tomcat",
    "jira",
    "confluence",
    "slack",
    "trello",
    "asana",
    "figma",
    "sketch",
    "photoshop",
    "illustrator",
];

/// Case-insensitive whole-word scan of the text against the vocabulary.
/// Returns the deduplicated set of terms found, in vocabulary order.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| contains_word(&haystack, skill))
        .map(|skill| (*skill).to_string())
        .collect()
}

/// Whole-word substring search where a boundary is any non-alphanumeric
/// character (or the text edge). A plain regex `\b` misbehaves for terms
/// ending in `+` or `#` ("c++", "c#"), so boundaries are checked manually.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let hay = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let open = start == 0 || !hay[start - 1].is_ascii_alphanumeric();
        let closed = end == hay.len() || !hay[end].is_ascii_alphanumeric();
        if open && closed {
            return true;
        }
        // Vocabulary terms are ASCII, so start + 1 stays on a char boundary.
        from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let skills = extract_skills("Experienced in PYTHON and React development");
        assert_eq!(skills, vec!["python", "react"]);
    }

    #[test]
    fn test_vocabulary_order_not_document_order() {
        let skills = extract_skills("docker then rust then javascript");
        assert_eq!(skills, vec!["javascript", "rust", "docker"]);
    }

    #[test]
    fn test_whole_word_only() {
        assert!(extract_skills("I love gophers").is_empty(), "'go' inside a word");
        assert_eq!(extract_skills("wrote Go services"), vec!["go"]);
    }

    #[test]
    fn test_symbol_heavy_terms() {
        assert_eq!(extract_skills("modern c++ codebases"), vec!["c++"]);
        assert_eq!(extract_skills("backend in C#."), vec!["c#"]);
    }

    #[test]
    fn test_multiword_term() {
        assert_eq!(
            extract_skills("administered SQL Server clusters"),
            vec!["sql server"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let skills = extract_skills("python python PYTHON");
        assert_eq!(skills, vec!["python"]);
    }

    #[test]
    fn test_single_letter_language() {
        assert_eq!(extract_skills("statistics in R and MATLAB"), vec!["r", "matlab"]);
        assert!(extract_skills("run rare errands").is_empty());
    }
}
