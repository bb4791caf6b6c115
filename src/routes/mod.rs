// # Routes Module
//
// - This module contains all HTTP route handlers for the delegate affairs server.
// - Routes are organized by screen into separate submodules.
//
//  ## Available Route Modules
// - `health`: Health check endpoint
// - `auth`: Login, logout and the home screen
// - `outreach`: Cold email generator
// - `delegates`: Delegate tracking table

/// Health check endpoint
pub mod health;

/// Login, logout and home
pub mod auth;

/// Cold email generator screen
pub mod outreach;

/// Delegate management screen
pub mod delegates;
