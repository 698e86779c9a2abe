// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! # Site Data Models
//!
//! Domain models for the site catalog: products, services, blog posts and
//! the editable site content. All types derive `Serialize`, `Deserialize`,
//! and `ToSchema` for automatic JSON handling and OpenAPI documentation.
//!
//! Prices are plain integer Rupiah amounts; the storefront's displayed price
//! is the promo price when one is set, the regular price otherwise.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Products
// =============================================================================

/// Publication state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible in the storefront
    Published,
    /// Being edited, not visible
    Draft,
    /// Withdrawn from the storefront
    Hidden,
}

/// One labelled specification line on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSpec {
    pub label: String,
    pub value: String,
}

/// A storefront product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: String,
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Stock-keeping unit code
    pub sku: String,
    pub category: String,
    pub description: String,
    /// Regular price in Rupiah
    pub regular_price: i64,
    /// Promotional price, when a promo is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_price: Option<i64>,
    /// Units in stock
    pub stock: u32,
    pub status: ProductStatus,
    /// Image URLs, first one is the card image
    pub images: Vec<String>,
    pub specifications: Vec<ProductSpec>,
}

impl Product {
    /// The price the storefront charges: promo when set, regular otherwise.
    pub fn effective_price(&self) -> i64 {
        self.promo_price.unwrap_or(self.regular_price)
    }
}

// =============================================================================
// Services
// =============================================================================

/// A service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub category: String,
    /// Card summary
    pub description: String,
    /// Long-form description for the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    /// Starting-price label, free-form ("Mulai Rp 1.500.000", "Survey Gratis")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_start: Option<String>,
    /// Icon name used by the frontend
    pub icon: String,
    /// What the engagement covers
    pub scope: Vec<String>,
    /// What the client receives
    pub deliverables: Vec<String>,
}

// =============================================================================
// Blog
// =============================================================================

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogPost {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: NaiveDate,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// =============================================================================
// Site Content
// =============================================================================

/// Contact block shown in the footer and contact section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub hours: String,
}

/// The editable marketing content of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SiteContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about_text: String,
    pub vision: String,
    /// Mission statements, one per line
    pub mission: Vec<String>,
    pub positioning_statement: String,
    pub final_cta_title: String,
    pub final_cta_subtitle: String,
    pub contact_info: ContactInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(regular: i64, promo: Option<i64>) -> Product {
        Product {
            id: "p".to_string(),
            name: "Test".to_string(),
            slug: "test".to_string(),
            sku: "T-1".to_string(),
            category: "Test".to_string(),
            description: String::new(),
            regular_price: regular,
            promo_price: promo,
            stock: 1,
            status: ProductStatus::Published,
            images: vec![],
            specifications: vec![],
        }
    }

    #[test]
    fn effective_price_prefers_promo() {
        assert_eq!(product(100, Some(80)).effective_price(), 80);
        assert_eq!(product(100, None).effective_price(), 100);
    }

    #[test]
    fn product_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Published).unwrap(),
            "\"published\""
        );
    }

    #[test]
    fn blog_post_date_roundtrips() {
        let post = BlogPost {
            id: "b".to_string(),
            title: "T".to_string(),
            excerpt: String::new(),
            content: String::new(),
            date: NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
            author: "A".to_string(),
            category: "C".to_string(),
            tags: vec![],
            image_url: None,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "2023-11-15");
        let back: BlogPost = serde_json::from_value(json).unwrap();
        assert_eq!(back.date, post.date);
    }
}
