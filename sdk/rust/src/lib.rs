//! Typed client for the employee service HTTP API.

mod client;

pub use client::{ClientError, Employee, EmployeeClient, EmployeePatch, NewEmployee};
