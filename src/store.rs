// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Read-only in-memory site catalog.
//!
//! The catalog is seeded once at startup with the site's demo data and never
//! mutates: it is safely shared across concurrent requests without locking.
//! Handlers receive it as an injected dependency through `AppState` so tests
//! can substitute fixtures.

use crate::models::{
    BlogPost, ContactInfo, Product, ProductSpec, ProductStatus, Service, SiteContent,
};
use chrono::NaiveDate;

/// Sort order for product queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Seed order (stable)
    #[default]
    Default,
    /// Cheapest effective price first
    PriceAsc,
    /// Highest effective price first
    PriceDesc,
}

impl ProductSort {
    /// Parse the query-string value used by the storefront.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "default" => Some(ProductSort::Default),
            "price-asc" => Some(ProductSort::PriceAsc),
            "price-desc" => Some(ProductSort::PriceDesc),
            _ => None,
        }
    }
}

/// Product query: every field is optional and narrows the published set.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category; `None` or `"All"` matches every category
    pub category: Option<String>,
    /// Case-insensitive substring over name and description
    pub search: Option<String>,
    /// Inclusive lower bound on the effective price
    pub min_price: Option<i64>,
    /// Inclusive upper bound on the effective price
    pub max_price: Option<i64>,
    pub sort: ProductSort,
}

/// The site's fixed data: products, services, blog posts, marketing content.
#[derive(Debug, Clone)]
pub struct SiteCatalog {
    products: Vec<Product>,
    services: Vec<Service>,
    posts: Vec<BlogPost>,
    content: SiteContent,
}

impl SiteCatalog {
    /// Build a catalog from explicit parts (used by tests).
    pub fn new(
        products: Vec<Product>,
        services: Vec<Service>,
        posts: Vec<BlogPost>,
        content: SiteContent,
    ) -> Self {
        Self {
            products,
            services,
            posts,
            content,
        }
    }

    /// All products, including drafts (admin view).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Query the published products.
    pub fn query_products(&self, filter: &ProductFilter) -> Vec<Product> {
        let category = filter
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "All");
        let search = filter
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());

        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.status == ProductStatus::Published)
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| {
                search.as_deref().map_or(true, |needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                })
            })
            .filter(|p| {
                let price = p.effective_price();
                filter.min_price.map_or(true, |min| price >= min)
                    && filter.max_price.map_or(true, |max| price <= max)
            })
            .cloned()
            .collect();

        match filter.sort {
            ProductSort::Default => {}
            ProductSort::PriceAsc => {
                matches.sort_by_key(|p| p.effective_price());
            }
            ProductSort::PriceDesc => {
                matches.sort_by_key(|p| std::cmp::Reverse(p.effective_price()));
            }
        }

        matches
    }

    /// Distinct categories of published products, first-appearance order,
    /// prefixed with the `All` pseudo-category.
    pub fn product_categories(&self) -> Vec<String> {
        let mut categories = vec!["All".to_string()];
        for product in self
            .products
            .iter()
            .filter(|p| p.status == ProductStatus::Published)
        {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// A published product by id.
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id && p.status == ProductStatus::Published)
    }

    /// All service offerings.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// A service by id.
    pub fn service_by_id(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Blog posts, optionally narrowed to one category. The first post of
    /// the returned set is the featured post.
    pub fn posts(&self, category: Option<&str>) -> Vec<BlogPost> {
        self.posts
            .iter()
            .filter(|p| {
                category
                    .filter(|c| !c.is_empty() && *c != "All")
                    .map_or(true, |c| p.category == c)
            })
            .cloned()
            .collect()
    }

    /// Distinct post categories, first-appearance order, prefixed with `All`.
    pub fn post_categories(&self) -> Vec<String> {
        let mut categories = vec!["All".to_string()];
        for post in &self.posts {
            if !categories.contains(&post.category) {
                categories.push(post.category.clone());
            }
        }
        categories
    }

    /// A post by id.
    pub fn post_by_id(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// The site's marketing content.
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// The demo catalog shipped with the site.
    pub fn demo() -> Self {
        let products = vec![
            Product {
                id: "p1".to_string(),
                name: "Laptop Dell Latitude 7490 (Second Like New)".to_string(),
                slug: "dell-7490".to_string(),
                sku: "LAP-001".to_string(),
                category: "Laptops".to_string(),
                description: "Laptop bisnis tangguh dengan prosesor i7 Gen 8. Cocok untuk kerja berat dan multitasking. Kondisi 95% mulus.".to_string(),
                regular_price: 5_500_000,
                promo_price: Some(4_950_000),
                stock: 5,
                status: ProductStatus::Published,
                images: vec![
                    "https://images.unsplash.com/photo-1593642702821-c8da6771f0c6?auto=format&fit=crop&w=500&q=60".to_string(),
                ],
                specifications: vec![
                    ProductSpec { label: "Processor".to_string(), value: "Intel Core i7-8650U".to_string() },
                    ProductSpec { label: "RAM".to_string(), value: "16GB DDR4".to_string() },
                    ProductSpec { label: "SSD".to_string(), value: "512GB NVMe".to_string() },
                ],
            },
            Product {
                id: "p2".to_string(),
                name: "Paket Kasir Android + Printer Thermal".to_string(),
                slug: "paket-kasir".to_string(),
                sku: "POS-002".to_string(),
                category: "Hardware".to_string(),
                description: "Solusi kasir hemat untuk UMKM. Tablet Android 10 inch + Stand + Printer Bluetooth.".to_string(),
                regular_price: 2_800_000,
                promo_price: None,
                stock: 10,
                status: ProductStatus::Published,
                images: vec![
                    "https://images.unsplash.com/photo-1556742049-0cfed4f7a07d?auto=format&fit=crop&w=500&q=60".to_string(),
                ],
                specifications: vec![
                    ProductSpec { label: "Tablet".to_string(), value: "Samsung Tab A7 Lite".to_string() },
                    ProductSpec { label: "Printer".to_string(), value: "Thermal 58mm Bluetooth".to_string() },
                ],
            },
        ];

        let services = vec![
            Service {
                id: "s1".to_string(),
                title: "Pembuatan Website Bisnis".to_string(),
                category: "Development".to_string(),
                description: "Website profesional untuk company profile atau landing page.".to_string(),
                full_description: Some("Paket lengkap pembuatan website dari desain UI/UX hingga deploy ke server. Termasuk domain dan SSL gratis untuk tahun pertama.".to_string()),
                price_start: Some("Mulai Rp 1.500.000".to_string()),
                icon: "Globe".to_string(),
                scope: vec![
                    "Desain UI/UX Premium".to_string(),
                    "Mobile Responsive".to_string(),
                    "SEO Basic Setup".to_string(),
                    "Integrasi WhatsApp".to_string(),
                    "Admin Dashboard".to_string(),
                ],
                deliverables: vec![
                    "Source Code".to_string(),
                    "Akses Hosting".to_string(),
                    "Manual Book".to_string(),
                    "Garansi Bug 3 Bulan".to_string(),
                ],
            },
            Service {
                id: "s2".to_string(),
                title: "Instalasi CCTV & Networking".to_string(),
                category: "Infrastructure".to_string(),
                description: "Amankan aset kantor dengan sistem pengawasan 24 jam.".to_string(),
                full_description: Some("Layanan instalasi kabel LAN (Structured Cabling) dan pemasangan titik kamera CCTV Hikvision/Dahua dengan akses pantau via HP.".to_string()),
                price_start: Some("Survey Gratis".to_string()),
                icon: "Video".to_string(),
                scope: vec![
                    "Survey Lokasi".to_string(),
                    "Penarikan Kabel".to_string(),
                    "Setting DVR/NVR".to_string(),
                    "Konfigurasi Online Viewing".to_string(),
                ],
                deliverables: vec![
                    "Layout Titik Kamera".to_string(),
                    "Dokumentasi Instalasi".to_string(),
                    "Training User".to_string(),
                ],
            },
            Service {
                id: "s3".to_string(),
                title: "Automasi Laporan Keuangan".to_string(),
                category: "Automation".to_string(),
                description: "Ubah data manual Excel menjadi dashboard otomatis.".to_string(),
                full_description: Some("Kami membangun sistem database sederhana menggunakan Google Sheets atau SQL untuk mengotomatisasi laporan penjualan harian Anda.".to_string()),
                price_start: Some("Mulai Rp 750.000".to_string()),
                icon: "Database".to_string(),
                scope: vec![
                    "Analisa Alur Data".to_string(),
                    "Cleaning Data".to_string(),
                    "Pembuatan Script Automasi".to_string(),
                    "Visualisasi Dashboard (Looker Studio)".to_string(),
                ],
                deliverables: vec![
                    "Dashboard Link".to_string(),
                    "Video Tutorial".to_string(),
                ],
            },
        ];

        let posts = vec![
            BlogPost {
                id: "b1".to_string(),
                title: "5 Tanda Bisnis Anda Butuh Sistem ERP".to_string(),
                excerpt: "Jangan tunggu berantakan. Kenali gejala awal operasional bisnis yang mulai overload dan butuh sistemasi.".to_string(),
                content: "Lorem ipsum content goes here...".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 11, 15).expect("valid seed date"),
                author: "Admin Azefine".to_string(),
                category: "Business".to_string(),
                tags: vec!["ERP".to_string(), "System".to_string(), "Efficiency".to_string()],
                image_url: Some("https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=800&q=80".to_string()),
            },
            BlogPost {
                id: "b2".to_string(),
                title: "Tips Memilih Laptop untuk Karyawan WFH".to_string(),
                excerpt: "Spesifikasi minimal yang kami sarankan agar tim Anda tetap produktif tanpa lag saat meeting online.".to_string(),
                content: "Lorem ipsum content goes here...".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 12, 1).expect("valid seed date"),
                author: "Teknisi IT".to_string(),
                category: "Tech Tips".to_string(),
                tags: vec!["Hardware".to_string(), "WFH".to_string()],
                image_url: Some("https://images.unsplash.com/photo-1496181133206-80ce9b88a853?auto=format&fit=crop&w=800&q=80".to_string()),
            },
        ];

        let content = SiteContent {
            hero_title: "Mitra Strategis untuk Solusi Bisnis & Teknologi".to_string(),
            hero_subtitle: "Azefine Worker menghadirkan layanan fleksibel lintas bidang. Fokus kami adalah eksekusi teknis yang presisi untuk pertumbuhan bisnis Anda.".to_string(),
            about_text: "Azefine Worker bermula dari keresahan akan kakunya layanan agensi konvensional. Kami hadir sebagai 'Worker Collective' yang siap terjun langsung membereskan masalah teknis di lapangan maupun di sistem cloud Anda.".to_string(),
            vision: "Menjadi enabler teknologi nomor satu untuk UMKM dan Perusahaan berkembang di Indonesia.".to_string(),
            mission: vec![
                "Menyediakan akses teknologi enterprise dengan harga terjangkau".to_string(),
                "Membangun ekosistem kerja yang kolaboratif".to_string(),
                "Memberikan solusi yang berorientasi pada hasil nyata (revenue/efficiency)".to_string(),
            ],
            positioning_statement: "Your On-Demand Technical Partner".to_string(),
            final_cta_title: "Siap Mengoptimalkan Bisnis Anda?".to_string(),
            final_cta_subtitle: "Jadwalkan sesi konsultasi gratis 30 menit bersama tim ahli kami.".to_string(),
            contact_info: ContactInfo {
                email: "hello@azefine.com".to_string(),
                phone: "+62 812-3456-7890".to_string(),
                address: "South Quarter, Tower A, Jl. R.A. Kartini Kav 8, Cilandak, Jakarta Selatan".to_string(),
                hours: "Senin - Jumat, 09:00 - 17:00".to_string(),
            },
        };

        Self::new(products, services, posts, content)
    }
}
