//! Template filtering and grouping
//!
//! Pure filtering over an in-memory template list: up to five independent
//! predicates applied conjunctively, plus fixed-bucket groupings and
//! aggregate counts. Never mutates the source list and preserves its order,
//! so it is safe to recompute on every access.

use crate::domain::entities::PromptTemplate;
use crate::domain::value_objects::{PromptLevel, PromptType};

/// Filter options; every unset field is a no-op predicate
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub template_type: Option<PromptType>,
    pub level: Option<PromptLevel>,
    /// Case-insensitive substring matched against name, description and content
    pub keyword: String,
    pub enabled: Option<bool>,
    pub project_id: Option<String>,
}

/// Applies a set of [`FilterOptions`] to template lists
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    options: FilterOptions,
}

impl TemplateFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Drop every filter back to its no-op default
    pub fn reset(&mut self) {
        self.options = FilterOptions::default();
    }

    /// Return the templates satisfying every active predicate, in input order
    pub fn apply<'a>(&self, templates: &'a [PromptTemplate]) -> Vec<&'a PromptTemplate> {
        let keyword = self.options.keyword.to_lowercase();
        templates
            .iter()
            .filter(|t| self.matches(t, &keyword))
            .collect()
    }

    fn matches(&self, template: &PromptTemplate, keyword: &str) -> bool {
        if let Some(template_type) = self.options.template_type {
            if template.template_type != template_type {
                return false;
            }
        }

        if let Some(level) = self.options.level {
            if template.level != level {
                return false;
            }
        }

        if !keyword.is_empty() {
            let hit = template.name.to_lowercase().contains(keyword)
                || template
                    .description
                    .as_ref()
                    .map_or(false, |d| d.to_lowercase().contains(keyword))
                || template.content.to_lowercase().contains(keyword);
            if !hit {
                return false;
            }
        }

        if let Some(enabled) = self.options.enabled {
            if template.enabled != enabled {
                return false;
            }
        }

        if let Some(project_id) = &self.options.project_id {
            if template.project_id.as_deref() != Some(project_id.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Templates bucketed by type
#[derive(Debug, Default)]
pub struct TypeGroups<'a> {
    pub clarification: Vec<&'a PromptTemplate>,
    pub optimization: Vec<&'a PromptTemplate>,
}

/// Templates bucketed by level
#[derive(Debug, Default)]
pub struct LevelGroups<'a> {
    pub system: Vec<&'a PromptTemplate>,
    pub project: Vec<&'a PromptTemplate>,
    pub user: Vec<&'a PromptTemplate>,
}

/// Aggregate counts over the unfiltered list (except `filtered`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStatistics {
    pub total: usize,
    pub filtered: usize,
    pub clarification: usize,
    pub optimization: usize,
    pub system: usize,
    pub project: usize,
    pub user: usize,
    pub enabled: usize,
    pub disabled: usize,
}

/// Group filtered templates into the two fixed type buckets
pub fn group_by_type<'a>(templates: &[&'a PromptTemplate]) -> TypeGroups<'a> {
    let mut groups = TypeGroups::default();
    for template in templates {
        match template.template_type {
            PromptType::RequirementClarification => groups.clarification.push(template),
            PromptType::RequirementOptimization => groups.optimization.push(template),
        }
    }
    groups
}

/// Group filtered templates into the three fixed level buckets
pub fn group_by_level<'a>(templates: &[&'a PromptTemplate]) -> LevelGroups<'a> {
    let mut groups = LevelGroups::default();
    for template in templates {
        match template.level {
            PromptLevel::System => groups.system.push(template),
            PromptLevel::Project => groups.project.push(template),
            PromptLevel::User => groups.user.push(template),
        }
    }
    groups
}

/// Compute aggregate counts for a list and its filtered view
pub fn statistics(templates: &[PromptTemplate], filtered: &[&PromptTemplate]) -> TemplateStatistics {
    let count_type =
        |t: PromptType| templates.iter().filter(|x| x.template_type == t).count();
    let count_level = |l: PromptLevel| templates.iter().filter(|x| x.level == l).count();
    let enabled = templates.iter().filter(|x| x.enabled).count();

    TemplateStatistics {
        total: templates.len(),
        filtered: filtered.len(),
        clarification: count_type(PromptType::RequirementClarification),
        optimization: count_type(PromptType::RequirementOptimization),
        system: count_level(PromptLevel::System),
        project: count_level(PromptLevel::Project),
        user: count_level(PromptLevel::User),
        enabled,
        disabled: templates.len() - enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(
        id: &str,
        template_type: PromptType,
        level: PromptLevel,
        enabled: bool,
    ) -> PromptTemplate {
        PromptTemplate {
            id: id.to_string(),
            name: format!("template-{}", id),
            template_type,
            level,
            content: "You are a requirements analyst.".to_string(),
            description: None,
            project_id: None,
            user_id: None,
            is_default: None,
            enabled,
            created_by: None,
            created_at: None,
            updated_by: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<PromptTemplate> {
        vec![
            template("a", PromptType::RequirementClarification, PromptLevel::System, true),
            template("b", PromptType::RequirementClarification, PromptLevel::System, false),
            template("c", PromptType::RequirementOptimization, PromptLevel::Project, true),
            template("d", PromptType::RequirementClarification, PromptLevel::User, true),
        ]
    }

    #[test]
    fn test_default_options_return_full_list_in_order() {
        let templates = sample();
        let filter = TemplateFilter::default();
        let filtered = filter.apply(&templates);

        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_type_and_enabled_filters_are_conjunctive() {
        let templates = sample();
        let filter = TemplateFilter::new(FilterOptions {
            template_type: Some(PromptType::RequirementClarification),
            enabled: Some(true),
            ..FilterOptions::default()
        });
        let filtered = filter.apply(&templates);

        // SYSTEM-enabled and USER-enabled survive, in that relative order
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_keyword_is_case_insensitive_across_fields() {
        let mut templates = sample();
        templates[0].name = "Clarify API contract".to_string();
        templates[1].description = Some("legacy API notes".to_string());
        templates[2].content = "Ask about the api surface".to_string();

        let filter = TemplateFilter::new(FilterOptions {
            keyword: "API".to_string(),
            ..FilterOptions::default()
        });
        let filtered = filter.apply(&templates);

        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_project_filter_requires_exact_match() {
        let mut templates = sample();
        templates[2].project_id = Some("proj-1".to_string());

        let filter = TemplateFilter::new(FilterOptions {
            project_id: Some("proj-1".to_string()),
            ..FilterOptions::default()
        });
        let filtered = filter.apply(&templates);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "c");
    }

    #[test]
    fn test_level_filter() {
        let templates = sample();
        let filter = TemplateFilter::new(FilterOptions {
            level: Some(PromptLevel::System),
            ..FilterOptions::default()
        });

        assert_eq!(filter.apply(&templates).len(), 2);
    }

    #[test]
    fn test_reset_restores_noop_filters() {
        let templates = sample();
        let mut filter = TemplateFilter::new(FilterOptions {
            enabled: Some(false),
            ..FilterOptions::default()
        });
        assert_eq!(filter.apply(&templates).len(), 1);

        filter.reset();
        assert_eq!(filter.apply(&templates).len(), templates.len());
    }

    #[test]
    fn test_group_by_type_buckets() {
        let templates = sample();
        let filter = TemplateFilter::default();
        let filtered = filter.apply(&templates);
        let groups = group_by_type(&filtered);

        assert_eq!(groups.clarification.len(), 3);
        assert_eq!(groups.optimization.len(), 1);
    }

    #[test]
    fn test_group_by_level_buckets() {
        let templates = sample();
        let filter = TemplateFilter::default();
        let filtered = filter.apply(&templates);
        let groups = group_by_level(&filtered);

        assert_eq!(groups.system.len(), 2);
        assert_eq!(groups.project.len(), 1);
        assert_eq!(groups.user.len(), 1);
    }

    #[test]
    fn test_statistics_counts_unfiltered_input() {
        let templates = sample();
        let filter = TemplateFilter::new(FilterOptions {
            enabled: Some(true),
            ..FilterOptions::default()
        });
        let filtered = filter.apply(&templates);
        let stats = statistics(&templates, &filtered);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.filtered, 3);
        assert_eq!(stats.clarification, 3);
        assert_eq!(stats.optimization, 1);
        assert_eq!(stats.system, 2);
        assert_eq!(stats.project, 1);
        assert_eq!(stats.user, 1);
        assert_eq!(stats.enabled, 3);
        assert_eq!(stats.disabled, 1);
    }

    #[test]
    fn test_apply_does_not_mutate_source() {
        let templates = sample();
        let before: Vec<String> = templates.iter().map(|t| t.id.clone()).collect();

        let filter = TemplateFilter::new(FilterOptions {
            template_type: Some(PromptType::RequirementOptimization),
            ..FilterOptions::default()
        });
        let _ = filter.apply(&templates);

        let after: Vec<String> = templates.iter().map(|t| t.id.clone()).collect();
        assert_eq!(before, after);
    }
}
