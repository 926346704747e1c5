//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations and orchestrate interactions between different parts of the
//! application, such as driving the support-ticket workflow or managing the
//! tool catalog.

pub mod catalog;
pub mod ticket_workflow;
