//! Fixed word lists: the skill lexicon, JD stopwords and action verbs.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    DataMl,
    CloudDevops,
    Databases,
    Tools,
    /// Only produced by the optional entity recognizer.
    Recognized,
}

impl SkillCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "Languages",
            SkillCategory::Frameworks => "Frameworks & Libraries",
            SkillCategory::DataMl => "Data & ML",
            SkillCategory::CloudDevops => "Cloud & DevOps",
            SkillCategory::Databases => "Databases",
            SkillCategory::Tools => "Tools",
            SkillCategory::Recognized => "Recognized",
        }
    }
}

/// A canonical skill name and the lowercase spellings that count as a hit.
///
/// `cased` spellings are ordinary English words as well ("react", "spring"),
/// so they only count when written exactly as given.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    pub name: &'static str,
    pub variants: &'static [&'static str],
    pub cased: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    pub categories: Vec<(SkillCategory, Vec<LexiconEntry>)>,
}

impl Lexicon {
    /// Number of lexicon categories (excludes `Recognized`).
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

macro_rules! entries {
    ($($name:literal => [$($variant:literal),+ $(,)?] $(cased [$($cased:literal),+])?),+ $(,)?) => {
        vec![$(LexiconEntry {
            name: $name,
            variants: &[$($variant),+],
            cased: &[$($($cased),+)?],
        }),+]
    };
}

pub static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    categories: vec![
        (
            SkillCategory::Languages,
            entries![
                "Python" => ["python"],
                "Java" => ["java"],
                "JavaScript" => ["javascript"],
                "TypeScript" => ["typescript"],
                "C++" => ["c++", "cpp"],
                "C#" => ["c#", "csharp"],
                "Go" => ["golang"],
                "Rust" => ["rustlang"] cased ["Rust"],
                "Scala" => ["scala"],
                "Kotlin" => ["kotlin"],
                "SQL" => ["sql"],
                "Bash" => ["bash", "shell scripting"],
            ],
        ),
        (
            SkillCategory::Frameworks,
            entries![
                "React" => ["reactjs", "react.js", "react native"] cased ["React"],
                "Node.js" => ["nodejs", "node.js"] cased ["Node"],
                "Django" => ["django"],
                "Flask" => ["flask"],
                "FastAPI" => ["fastapi"],
                "Spring" => ["spring boot", "spring framework"] cased ["Spring"],
                "Angular" => ["angular"],
                "Vue" => ["vue", "vue.js", "vuejs"],
            ],
        ),
        (
            SkillCategory::DataMl,
            entries![
                "TensorFlow" => ["tensorflow"],
                "PyTorch" => ["pytorch"],
                "Keras" => ["keras"],
                "scikit-learn" => ["scikit-learn", "sklearn"],
                "Pandas" => ["pandas"],
                "NumPy" => ["numpy"],
                "Matplotlib" => ["matplotlib"],
                "Seaborn" => ["seaborn"],
                "Spark" => ["pyspark", "apache spark", "spark sql"] cased ["Spark"],
                "NLP" => ["nlp", "natural language processing"],
                "Computer Vision" => ["computer vision"],
                "Machine Learning" => ["machine learning"],
                "Deep Learning" => ["deep learning"],
            ],
        ),
        (
            SkillCategory::CloudDevops,
            entries![
                "AWS" => ["aws", "amazon web services"],
                "GCP" => ["gcp", "google cloud"],
                "Azure" => ["azure"],
                "Docker" => ["docker"],
                "Kubernetes" => ["kubernetes", "k8s"],
                "Terraform" => ["terraform"],
                "CI/CD" => ["ci/cd", "cicd"],
                "Linux" => ["linux"],
            ],
        ),
        (
            SkillCategory::Databases,
            entries![
                "PostgreSQL" => ["postgres", "postgresql"],
                "MySQL" => ["mysql"],
                "MongoDB" => ["mongodb", "mongo"],
                "Redis" => ["redis"],
                "Elasticsearch" => ["elasticsearch"],
            ],
        ),
        (
            SkillCategory::Tools,
            entries![
                "Git" => ["git"],
                "REST APIs" => ["rest api", "rest apis", "restful"],
                "GraphQL" => ["graphql"],
                "Airflow" => ["airflow"],
                "Kafka" => ["kafka"],
                "Tableau" => ["tableau"],
                "Power BI" => ["power bi", "powerbi"],
            ],
        ),
    ],
});

/// Words ignored when comparing job description and resume vocabulary.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "ability", "able", "across", "all", "also", "an", "and", "any", "are",
        "as", "at", "be", "been", "being", "both", "but", "by", "can", "candidate", "company",
        "do", "each", "etc", "experience", "for", "from", "good", "has", "have", "help",
        "ideal", "in", "including", "into", "is", "it", "its", "job", "join", "looking",
        "may", "more", "most", "must", "new", "nice", "not", "of", "on", "one", "or", "our",
        "other", "plus", "preferred", "required", "requirements", "responsibilities", "role",
        "should", "so", "strong", "such", "team", "than", "that", "the", "their", "them",
        "there", "these", "they", "this", "to", "up", "us", "using", "we", "well", "what",
        "who", "will", "with", "work", "working", "would", "year", "years", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Verbs that signal ownership of work in experience bullets.
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "architected",
    "automated",
    "built",
    "delivered",
    "deployed",
    "designed",
    "developed",
    "drove",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "migrated",
    "optimized",
    "owned",
    "reduced",
    "scaled",
    "shipped",
];

/// Tool names recognised when scoring interview answers and picking an answer's tool.
pub const CORE_TOOLS: &[&str] = &[
    "python",
    "sql",
    "tensorflow",
    "pytorch",
    "docker",
    "aws",
    "gcp",
    "spark",
    "keras",
    "sklearn",
    "react",
    "node",
    "java",
];
