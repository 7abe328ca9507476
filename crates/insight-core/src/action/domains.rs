//! Domain keyword and template table.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder replaced in every template.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// What `{domain}` is replaced with.
pub const DOMAIN_SUBSTITUTE: &str = "project";

static STANDARD: LazyLock<DomainTable> = LazyLock::new(DomainTable::build_standard);

/// A topical bucket with its trigger keywords and phrasing templates.
#[derive(Debug)]
pub struct Domain {
    pub name: &'static str,
    pub templates: [&'static str; 5],
    keywords: Vec<(&'static str, Regex)>,
}

impl Domain {
    fn new(name: &'static str, keywords: &[&'static str], templates: [&'static str; 5]) -> Self {
        let keywords = keywords
            .iter()
            .map(|&k| {
                let pattern = format!(r"(?i)\b{}\w*\b", regex::escape(k));
                (k, Regex::new(&pattern).expect("escaped keyword is a valid pattern"))
            })
            .collect();
        Self {
            name,
            templates,
            keywords,
        }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keywords.iter().map(|(k, _)| *k)
    }

    /// Keywords found in already-normalized text.
    pub fn matched_keywords(&self, normalized: &str) -> Vec<&'static str> {
        self.keywords
            .iter()
            .filter(|(_, re)| re.is_match(normalized))
            .map(|(k, _)| *k)
            .collect()
    }

    /// Template at `index` with the placeholder substituted.
    pub fn render(&self, index: usize) -> String {
        self.templates[index % self.templates.len()].replacen(DOMAIN_PLACEHOLDER, DOMAIN_SUBSTITUTE, 1)
    }
}

/// Immutable domain table, built once.
#[derive(Debug)]
pub struct DomainTable {
    domains: Vec<Domain>,
}

impl DomainTable {
    /// The shared six-domain table.
    pub fn standard() -> &'static DomainTable {
        &STANDARD
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Domains with at least one keyword in the text, in table order,
    /// alongside the keywords that matched.
    pub fn matches(&self, text: &str) -> Vec<(&Domain, Vec<&'static str>)> {
        let normalized = normalize(text);
        self.domains
            .iter()
            .filter_map(|d| {
                let hits = d.matched_keywords(&normalized);
                (!hits.is_empty()).then_some((d, hits))
            })
            .collect()
    }

    fn build_standard() -> Self {
        let domains = vec![
            Domain::new(
                "product",
                &[
                    "interface",
                    "design",
                    "user experience",
                    "usability",
                    "layout",
                    "interaction",
                    "visual",
                    "prototype",
                    "wireframe",
                    "navigation",
                ],
                [
                    "Redesign {domain} interface to improve user engagement",
                    "Optimize {domain} user flow and interaction patterns",
                    "Conduct comprehensive UX audit for {domain} experience",
                    "Develop more intuitive navigation for {domain} features",
                    "Create user-centric design improvements for {domain}",
                ],
            ),
            Domain::new(
                "service",
                &[
                    "support",
                    "customer",
                    "onboarding",
                    "training",
                    "help",
                    "assistance",
                    "guidance",
                    "resolution",
                    "communication",
                ],
                [
                    "Enhance {domain} customer onboarding process",
                    "Develop comprehensive support strategy for {domain}",
                    "Create advanced customer assistance workflow",
                    "Improve service communication and responsiveness",
                    "Design proactive customer support mechanisms",
                ],
            ),
            Domain::new(
                "marketing",
                &[
                    "messaging",
                    "brand",
                    "communication",
                    "positioning",
                    "value proposition",
                    "storytelling",
                    "audience",
                    "campaign",
                ],
                [
                    "Refine {domain} brand messaging and positioning",
                    "Develop targeted communication strategy for {domain}",
                    "Create compelling narrative for {domain} value proposition",
                    "Design audience-specific marketing approach",
                    "Optimize brand communication channels",
                ],
            ),
            Domain::new(
                "technology",
                &[
                    "performance",
                    "scalability",
                    "architecture",
                    "infrastructure",
                    "integration",
                    "security",
                    "optimization",
                    "tech stack",
                    "backend",
                    "frontend",
                    "cloud",
                    "api",
                ],
                [
                    "Improve {domain} system performance and scalability",
                    "Enhance technological infrastructure for {domain}",
                    "Develop robust integration strategy",
                    "Implement advanced security protocols",
                    "Optimize technical architecture and ecosystem",
                ],
            ),
            Domain::new(
                "operations",
                &[
                    "process",
                    "efficiency",
                    "workflow",
                    "automation",
                    "productivity",
                    "streamline",
                    "optimization",
                    "management",
                ],
                [
                    "Streamline {domain} operational workflows",
                    "Develop process automation strategy",
                    "Improve operational efficiency and productivity",
                    "Create comprehensive operational optimization plan",
                    "Implement advanced workflow management techniques",
                ],
            ),
            Domain::new(
                "strategy",
                &[
                    "vision",
                    "direction",
                    "roadmap",
                    "growth",
                    "expansion",
                    "market",
                    "competitive",
                    "long-term",
                    "objective",
                    "goal",
                ],
                [
                    "Develop strategic roadmap for {domain} growth",
                    "Create comprehensive market expansion strategy",
                    "Define long-term vision and competitive positioning",
                    "Align business objectives with market opportunities",
                    "Design strategic framework for sustainable development",
                ],
            ),
        ];
        Self { domains }
    }
}

/// Lowercase and strip `. , / # ! $ % ^ & * ; : { } = - _ ` ~ ( )`.
pub fn normalize(text: &str) -> String {
    const STRIPPED: &[char] = &[
        '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~', '(', ')',
    ];
    text.to_lowercase().chars().filter(|c| !STRIPPED.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = DomainTable::standard();
        let names: Vec<_> = table.domains().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["product", "service", "marketing", "technology", "operations", "strategy"]
        );
        assert!(table.domains().iter().all(|d| d.templates.len() == 5));
        assert_eq!(table.get("service").unwrap().keywords().count(), 9);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Sign-up (API) flow: slow!"), "signup api flow slow");
        assert_eq!(normalize("snake_case ~ `tick`"), "snakecase  tick");
    }

    #[test]
    fn test_keyword_prefix_match() {
        let table = DomainTable::standard();
        let matches = table.matches("Our APIs feel slow and the designers want a new layout.");
        let names: Vec<_> = matches.iter().map(|(d, _)| d.name).collect();
        assert_eq!(names, vec!["product", "technology"]);
        assert_eq!(matches[0].1, vec!["design", "layout"]);
        assert_eq!(matches[1].1, vec!["api"]);
    }

    #[test]
    fn test_word_boundary_on_the_left() {
        // "rapid" contains "api" but not at a word start
        assert!(DomainTable::standard().matches("a rapid fix").is_empty());
    }

    #[test]
    fn test_multi_word_keywords() {
        let matches = DomainTable::standard().matches("Our Value Proposition is unclear");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0.name, "marketing");
    }

    #[test]
    fn test_shared_keyword_matches_both_domains() {
        let names: Vec<_> = DomainTable::standard()
            .matches("needs optimization")
            .iter()
            .map(|(d, _)| d.name)
            .collect();
        assert_eq!(names, vec!["technology", "operations"]);
    }

    #[test]
    fn test_render_substitutes_placeholder() {
        let product = DomainTable::standard().get("product").unwrap();
        assert_eq!(product.render(0), "Redesign project interface to improve user engagement");
        let technology = DomainTable::standard().get("technology").unwrap();
        assert_eq!(technology.render(2), "Develop robust integration strategy");
        assert!(DomainTable::standard()
            .domains()
            .iter()
            .flat_map(|d| (0..5).map(move |i| d.render(i)))
            .all(|t| !t.contains(DOMAIN_PLACEHOLDER)));
    }
}
