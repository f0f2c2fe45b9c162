//! Public campaign data-access contract and the in-memory mock backing it.

pub mod client;
pub mod mock;

pub use client::CampaignApi;
pub use mock::MockCampaignApi;
