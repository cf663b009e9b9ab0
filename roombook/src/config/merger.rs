//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, EstimatorConfig};

/// Merges configuration layers; later layers win.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, lowest precedence first, onto `base`.
    #[must_use]
    pub fn merge(base: Config, sources: &[ConfigSource]) -> Config {
        let mut result = base;
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Known rooms: complete replacement, never a union, so a narrower
    ///   list in a later layer really narrows the set
    /// - Estimator config: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.known_rooms.is_some() {
            target.known_rooms.clone_from(&source.known_rooms);
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_estimator) = source.estimator {
            target.estimator = Some(match &target.estimator {
                Some(target_estimator) => Self::merge_estimator(target_estimator, source_estimator),
                None => source_estimator.clone(),
            });
        }
    }

    fn merge_estimator(target: &EstimatorConfig, source: &EstimatorConfig) -> EstimatorConfig {
        EstimatorConfig {
            respect_eligibility: source.respect_eligibility.or(target.respect_eligibility),
        }
    }
}
