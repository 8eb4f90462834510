// ABOUTME: Data context for dependency injection of gateway and health services
// ABOUTME: Contains the remote data gateway and the device health capability
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::gateway::DataGateway;
use crate::health::HealthCapability;
use std::sync::Arc;

/// Data context containing gateway and health capability dependencies
///
/// # Dependencies
/// - `gateway`: remote store interface for all persistence operations
/// - `health`: native device health capability (steps, heart rate, sleep)
#[derive(Clone)]
pub struct DataContext {
    gateway: Arc<dyn DataGateway>,
    health: Arc<dyn HealthCapability>,
}

impl DataContext {
    /// Create new data context
    #[must_use]
    pub fn new(gateway: Arc<dyn DataGateway>, health: Arc<dyn HealthCapability>) -> Self {
        Self { gateway, health }
    }

    /// Get gateway for persistence operations
    #[must_use]
    pub fn gateway(&self) -> &Arc<dyn DataGateway> {
        &self.gateway
    }

    /// Get the device health capability
    #[must_use]
    pub fn health(&self) -> &Arc<dyn HealthCapability> {
        &self.health
    }
}
