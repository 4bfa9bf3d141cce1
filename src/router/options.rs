use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::{DEFAULT_EVICT_PERCENT, DEFAULT_SEGMENT_CACHE_CAPACITY};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    pub segment_cache_capacity: usize,
    pub segment_cache_evict_percent: u8,
    pub validate_regex_syntax: bool,
    pub debug: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            segment_cache_capacity: DEFAULT_SEGMENT_CACHE_CAPACITY,
            segment_cache_evict_percent: DEFAULT_EVICT_PERCENT,
            validate_regex_syntax: true,
            debug: false,
        }
    }
}

impl RouterConfig {
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterConfigError> {
        if self.segment_cache_capacity == 0 {
            return Err(RouterConfigError::SegmentCacheCapacityInvalid {
                provided: self.segment_cache_capacity,
            });
        }
        if !(1..=100).contains(&self.segment_cache_evict_percent) {
            return Err(RouterConfigError::EvictPercentOutOfRange {
                value: self.segment_cache_evict_percent,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    pub fn segment_cache_capacity(mut self, value: usize) -> Self {
        self.config.segment_cache_capacity = value;
        self
    }

    pub fn segment_cache_evict_percent(mut self, value: u8) -> Self {
        self.config.segment_cache_evict_percent = value;
        self
    }

    pub fn validate_regex_syntax(mut self, value: bool) -> Self {
        self.config.validate_regex_syntax = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.config.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterConfig, RouterConfigError> {
        let config = self.config;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterConfigError {
    #[error("segment_cache_capacity must be at least 1 (got {provided})")]
    SegmentCacheCapacityInvalid { provided: usize },
    #[error("segment_cache_evict_percent {value} is outside the supported range 1..=100")]
    EvictPercentOutOfRange { value: u8 },
}

pub type RouterOptions = RouterConfig;
pub type RouterOptionsBuilder = RouterConfigBuilder;
pub type RouterOptionsError = RouterConfigError;
