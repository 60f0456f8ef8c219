//! Static marketing content for the public pages.
//!
//! Everything here is fixed copy; handlers clone what they render.

use spaceway_core::ServiceTag;

/// A top navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

/// Primary navigation, in display order.
pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { name: "Home", path: "/" },
    NavLink { name: "Products", path: "/products" },
    NavLink { name: "Turnover", path: "/turnover" },
    NavLink { name: "About us", path: "/about" },
    NavLink { name: "Support", path: "/support" },
    NavLink { name: "Demo", path: "/demo" },
];

/// A titled link column in the footer.
#[derive(Debug, Clone)]
pub struct FooterColumn {
    pub title: &'static str,
    pub links: Vec<NavLink>,
}

#[must_use]
pub fn footer_columns() -> Vec<FooterColumn> {
    vec![
        FooterColumn {
            title: "Product",
            links: vec![
                NavLink { name: "Features", path: "/products" },
                NavLink { name: "Pricing", path: "/products#pricing" },
                NavLink { name: "Integrations", path: "/products#integrations" },
                NavLink { name: "API Documentation", path: "/support" },
            ],
        },
        FooterColumn {
            title: "Company",
            links: vec![
                NavLink { name: "About Us", path: "/about" },
                NavLink { name: "Careers", path: "/about" },
                NavLink { name: "Contact", path: "/support#contact" },
            ],
        },
        FooterColumn {
            title: "Resources",
            links: vec![
                NavLink { name: "Help Center", path: "/support" },
                NavLink { name: "Demo", path: "/demo" },
                NavLink { name: "Calculator", path: "/turnover" },
            ],
        },
        FooterColumn {
            title: "Legal",
            links: vec![
                NavLink { name: "Privacy Policy", path: "/privacy" },
                NavLink { name: "Terms of Service", path: "/terms" },
                NavLink { name: "Cookie Policy", path: "/cookies" },
                NavLink { name: "GDPR", path: "/gdpr" },
            ],
        },
    ]
}

/// A headline number (value + label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// Numbers under the hero heading.
#[must_use]
pub fn hero_stats() -> Vec<Stat> {
    vec![
        Stat { value: "10K+", label: "Active SKUs" },
        Stat { value: "40%", label: "Profit Increase" },
        Stat { value: "24/7", label: "Price Monitoring" },
    ]
}

/// A feature card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Home page feature grid.
#[must_use]
pub fn home_features() -> Vec<Feature> {
    vec![
        Feature {
            title: "Marketplace Integration",
            description: "Seamlessly connect with Amazon, Flipkart, and 15+ marketplaces. Centralize all your product listings in one powerful dashboard.",
        },
        Feature {
            title: "Competitor Tracking",
            description: "Monitor competitor prices 24/7 with intelligent alerts. Get instant notifications when prices change in your market.",
        },
        Feature {
            title: "Automated Repricing",
            description: "Set intelligent pricing rules based on MRP, competition, and profit margins. Automate repricing to stay competitive.",
        },
        Feature {
            title: "Analytics Dashboard",
            description: "Comprehensive P&L reports, turnover analysis, and performance metrics. Export data in PDF/Excel formats.",
        },
    ]
}

/// Results a customer reports in a testimonial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialMetrics {
    pub revenue: &'static str,
    pub time_saved: &'static str,
    pub skus: &'static str,
}

/// One slide of the testimonials carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub name: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub rating: u8,
    pub content: &'static str,
    pub metrics: TestimonialMetrics,
}

#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "Rajesh Kumar",
            title: "E-commerce Manager",
            company: "TechMart Solutions",
            rating: 5,
            content: "Spaceway transformed our pricing strategy completely. We saw a 35% increase in revenue within the first quarter. The automated repricing feature saved us 20 hours per week, and the competitor tracking is incredibly accurate.",
            metrics: TestimonialMetrics {
                revenue: "+35%",
                time_saved: "20hrs/week",
                skus: "2,500+",
            },
        },
        Testimonial {
            name: "Priya Sharma",
            title: "Business Owner",
            company: "Fashion Forward",
            rating: 5,
            content: "The marketplace integration is seamless. Managing products across Amazon, Flipkart, and our website became effortless. The P&L reports help us make data-driven decisions every day.",
            metrics: TestimonialMetrics {
                revenue: "+42%",
                time_saved: "15hrs/week",
                skus: "1,800+",
            },
        },
        Testimonial {
            name: "Amit Patel",
            title: "Pricing Analyst",
            company: "ElectroHub",
            rating: 5,
            content: "Real-time competitor monitoring is a game-changer. We get instant alerts when competitors change prices, allowing us to respond immediately. Our profit margins improved by 28%.",
            metrics: TestimonialMetrics {
                revenue: "+28%",
                time_saved: "25hrs/week",
                skus: "5,000+",
            },
        },
        Testimonial {
            name: "Sneha Reddy",
            title: "Operations Head",
            company: "HomeDecor Plus",
            rating: 5,
            content: "The turnover calculator helped us identify underperforming products and optimize our entire catalog. Customer support is exceptional, and the platform is incredibly user-friendly.",
            metrics: TestimonialMetrics {
                revenue: "+31%",
                time_saved: "18hrs/week",
                skus: "3,200+",
            },
        },
    ]
}

/// Wrap a carousel position into `0..len`.
///
/// Out-of-range and negative positions wrap around, so "previous" from the
/// first slide lands on the last.
#[must_use]
pub fn wrap_slide(position: i64, len: usize) -> usize {
    let Ok(len) = i64::try_from(len) else {
        return 0;
    };
    if len == 0 {
        return 0;
    }
    usize::try_from(position.rem_euclid(len)).unwrap_or(0)
}

/// A marketplace with its integration status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marketplace {
    pub name: &'static str,
    pub status: &'static str,
}

#[must_use]
pub fn marketplaces() -> Vec<Marketplace> {
    vec![
        Marketplace { name: "Amazon", status: "Certified Partner" },
        Marketplace { name: "Flipkart", status: "Verified Integration" },
        Marketplace { name: "Myntra", status: "API Partner" },
        Marketplace { name: "Shopify", status: "App Store Listed" },
        Marketplace { name: "WooCommerce", status: "Plugin Available" },
        Marketplace { name: "Magento", status: "Extension Ready" },
    ]
}

#[must_use]
pub fn certifications() -> Vec<Feature> {
    vec![
        Feature { title: "SSL Secured", description: "256-bit encryption" },
        Feature { title: "GDPR Compliant", description: "Data protection certified" },
        Feature { title: "ISO 27001", description: "Security management" },
        Feature { title: "SOC 2 Type II", description: "Audited security controls" },
    ]
}

#[must_use]
pub fn user_stats() -> Vec<Stat> {
    vec![
        Stat { value: "10,000+", label: "Active Users" },
        Stat { value: "50M+", label: "Products Tracked" },
        Stat { value: "₹500Cr+", label: "Revenue Optimized" },
        Stat { value: "99.9%", label: "Uptime SLA" },
    ]
}

/// A tab on the products page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFeature {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub details: Vec<&'static str>,
    pub metrics: Vec<&'static str>,
}

#[must_use]
pub fn product_features() -> Vec<ProductFeature> {
    vec![
        ProductFeature {
            id: "listings",
            title: "Marketplace Listings",
            description: "Connect and manage your products across Amazon, Flipkart, and other major marketplaces",
            details: vec![
                "Multi-marketplace synchronization",
                "Bulk product upload and management",
                "Automated inventory tracking",
                "Cross-platform analytics",
                "Real-time status monitoring",
                "Performance optimization suggestions",
            ],
            metrics: vec!["500K+ Products", "99.9% Sync Rate", "24/7 Monitoring"],
        },
        ProductFeature {
            id: "pricing",
            title: "Competitor Pricing",
            description: "Real-time price tracking and competitive intelligence for strategic pricing decisions",
            details: vec![
                "Real-time competitor price monitoring",
                "Price history and trend analysis",
                "Market position insights",
                "Automated price alerts",
                "Competitive landscape mapping",
                "Dynamic pricing recommendations",
            ],
            metrics: vec!["1M+ Prices Tracked", "Real-time Updates", "95% Accuracy"],
        },
        ProductFeature {
            id: "repricing",
            title: "MRP-Based Repricing",
            description: "Automated rule-based repricing system to optimize profit margins and competitiveness",
            details: vec![
                "MRP-based pricing rules",
                "Margin protection algorithms",
                "Competitor-aware pricing",
                "Seasonal price adjustments",
                "A/B testing for price points",
                "Performance impact analysis",
            ],
            metrics: vec!["40% Avg Profit Increase", "Smart Rules Engine", "Auto Adjustments"],
        },
        ProductFeature {
            id: "analytics",
            title: "P&L Accounting",
            description: "Comprehensive profit and loss reporting with detailed financial analytics",
            details: vec![
                "Automated P&L generation",
                "Revenue stream analysis",
                "Cost breakdown tracking",
                "Margin optimization insights",
                "Tax and compliance reporting",
                "Financial forecasting",
            ],
            metrics: vec!["Complete P&L View", "Tax Ready Reports", "Real-time Insights"],
        },
        ProductFeature {
            id: "stock",
            title: "SKU & Stock Management",
            description: "Advanced inventory management with SKU tracking and stock level optimization",
            details: vec![
                "Multi-location inventory tracking",
                "SKU performance analytics",
                "Stock level optimization",
                "Automated reorder points",
                "Dead stock identification",
                "Seasonal demand forecasting",
            ],
            metrics: vec!["10K+ SKUs Managed", "Zero Stockouts", "Smart Forecasting"],
        },
        ProductFeature {
            id: "mrp",
            title: "MRP Comparison",
            description: "Detect pricing anomalies and opportunities through comprehensive MRP analysis",
            details: vec![
                "Market MRP benchmarking",
                "Price anomaly detection",
                "Competitive gap analysis",
                "Optimization opportunities",
                "Brand positioning insights",
                "Market share analysis",
            ],
            metrics: vec!["Market Benchmark", "Anomaly Detection", "Price Optimization"],
        },
    ]
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub button_text: &'static str,
    pub button_href: &'static str,
    pub popular: bool,
}

#[must_use]
pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            name: "Starter",
            price: "₹999",
            period: "/month",
            description: "Perfect for small businesses getting started",
            features: vec![
                "Up to 100 products",
                "Basic analytics",
                "2 marketplace connections",
                "Email support",
                "Monthly reports",
            ],
            button_text: "Start Free Trial",
            button_href: "/register",
            popular: false,
        },
        PricingPlan {
            name: "Professional",
            price: "₹2,999",
            period: "/month",
            description: "For growing businesses with advanced needs",
            features: vec![
                "Up to 1,000 products",
                "Advanced analytics",
                "5 marketplace connections",
                "Priority support",
                "Real-time reports",
                "Automated repricing",
            ],
            button_text: "Get Started",
            button_href: "/register",
            popular: true,
        },
        PricingPlan {
            name: "Enterprise",
            price: "Custom",
            period: "",
            description: "Tailored solutions for large enterprises",
            features: vec![
                "Unlimited products",
                "Custom analytics",
                "All marketplace connections",
                "Dedicated support",
                "Custom integrations",
                "White-label options",
            ],
            button_text: "Contact Sales",
            button_href: "/support#contact",
            popular: false,
        },
    ]
}

/// A person on the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
}

#[must_use]
pub fn team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "Arjun Mehta",
            role: "CEO & Co-founder",
            description: "Former Amazon executive with 12+ years in e-commerce analytics",
        },
        TeamMember {
            name: "Deepak Gupta",
            role: "Tech Head & Co-founder",
            description: "Passionate developer crafting modern, scalable, and visually impressive web applications",
        },
        TeamMember {
            name: "Mahaan Lal Srivastav",
            role: "DevOps Head & Co-founder",
            description: "Full-stack architect with expertise in distributed systems and data infrastructure",
        },
    ]
}

/// A dated step in the company history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[must_use]
pub fn milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            year: "2020",
            title: "The Beginning",
            description: "Founded with a vision to democratize e-commerce analytics for Indian businesses",
        },
        Milestone {
            year: "2021",
            title: "Product Development",
            description: "Built MVP and onboarded first 100 customers with basic analytics features",
        },
        Milestone {
            year: "2022",
            title: "Market Expansion",
            description: "Integrated with major marketplaces and launched automated repricing engine",
        },
        Milestone {
            year: "2023",
            title: "AI Integration",
            description: "Introduced ML-powered insights and predictive analytics capabilities",
        },
        Milestone {
            year: "2024",
            title: "Scale & Growth",
            description: "Expanded to enterprise solutions and launched advanced BI platform",
        },
    ]
}

/// Reasons to choose Spaceway.
#[must_use]
pub fn values() -> Vec<Feature> {
    vec![
        Feature {
            title: "Indian Market Expertise",
            description: "Deep understanding of Indian e-commerce ecosystem and regulatory requirements",
        },
        Feature {
            title: "Marketplace Native",
            description: "Built specifically for multi-marketplace operations with native integrations",
        },
        Feature {
            title: "Data-Driven Insights",
            description: "Advanced analytics and ML models trained on billions of data points",
        },
        Feature {
            title: "Scalable Architecture",
            description: "Cloud-native platform built to handle millions of products and transactions",
        },
        Feature {
            title: "Customer-Centric",
            description: "Dedicated support team and continuous feature development based on feedback",
        },
        Feature {
            title: "Innovation First",
            description: "Cutting-edge technology with regular updates and new feature releases",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// FAQ entries grouped under a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqCategory {
    pub slug: &'static str,
    pub name: &'static str,
    pub questions: Vec<Faq>,
}

#[must_use]
pub fn faq_categories() -> Vec<FaqCategory> {
    vec![
        FaqCategory {
            slug: "getting-started",
            name: "Getting Started",
            questions: vec![
                Faq {
                    question: "How do I get started with Spaceway?",
                    answer: "Getting started is easy! Sign up for a free 14-day trial, connect your marketplaces, and our onboarding team will guide you through setup. No credit card required.",
                },
                Faq {
                    question: "Which marketplaces does Spaceway support?",
                    answer: "We support Amazon, Flipkart, Myntra, Snapdeal, Paytm Mall, and more, including eBay and Shopify integrations.",
                },
                Faq {
                    question: "How long does setup take?",
                    answer: "Initial setup takes 15-30 minutes. Full data sync usually completes within 24 hours.",
                },
            ],
        },
        FaqCategory {
            slug: "features-pricing",
            name: "Features & Pricing",
            questions: vec![
                Faq {
                    question: "What is included in the free trial?",
                    answer: "The 14-day free trial includes marketplace integration, competitor tracking, analytics dashboard, and full customer support.",
                },
                Faq {
                    question: "Can I change my plan anytime?",
                    answer: "Yes, upgrades or downgrades take effect immediately, with prorated billing.",
                },
                Faq {
                    question: "Do you offer enterprise solutions?",
                    answer: "Yes. Custom enterprise solutions with white-label options, integrations, and SLA guarantees are available.",
                },
            ],
        },
        FaqCategory {
            slug: "technical",
            name: "Technical Support",
            questions: vec![
                Faq {
                    question: "How accurate is the competitor tracking?",
                    answer: "Our tracking is 95%+ accurate with real-time updates every 15 minutes.",
                },
                Faq {
                    question: "Is my data secure?",
                    answer: "Yes, we use 256-bit SSL encryption, SOC 2 compliance, and regular audits for data safety.",
                },
                Faq {
                    question: "Can I get help during setup?",
                    answer: "Our support team offers onboarding, training, documentation, video tutorials, and live chat.",
                },
            ],
        },
        FaqCategory {
            slug: "billing",
            name: "Billing & Account",
            questions: vec![
                Faq {
                    question: "What payment methods do you accept?",
                    answer: "We accept credit/debit cards, UPI, net banking, and enterprise billing options.",
                },
                Faq {
                    question: "Can I cancel anytime?",
                    answer: "Yes, cancel anytime with no fees. Your account stays active until the billing period ends.",
                },
                Faq {
                    question: "Do you offer refunds?",
                    answer: "Yes, with a 30-day money-back guarantee if you're not satisfied. Contact us within 30 days of payment.",
                },
            ],
        },
    ]
}

/// A way to reach support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportChannel {
    pub title: &'static str,
    pub description: &'static str,
    pub availability: &'static str,
    pub action: &'static str,
    pub href: &'static str,
}

#[must_use]
pub fn support_channels() -> Vec<SupportChannel> {
    vec![
        SupportChannel {
            title: "Live Chat",
            description: "Get instant help from our support team and resolve quickly",
            availability: "24/7 Available",
            action: "Start Chat",
            href: "#contact",
        },
        SupportChannel {
            title: "Email Support",
            description: "Send us questions for comprehensive answers",
            availability: "Response within 4 hours",
            action: "Send Email",
            href: "mailto:support@spaceway.in",
        },
        SupportChannel {
            title: "Phone Support",
            description: "Speak directly with technical experts and our support team",
            availability: "Mon-Fri, 9AM-8PM IST",
            action: "Call Now",
            href: "tel:+918000000000",
        },
    ]
}

/// A guide or tutorial in the resource list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub category: &'static str,
}

#[must_use]
pub fn resources() -> Vec<Resource> {
    vec![
        Resource {
            title: "Getting Started Guide",
            description: "Complete walkthrough from signup to first optimization",
            duration: "15 min read",
            category: "Tutorial",
        },
        Resource {
            title: "Marketplace Integration",
            description: "Step-by-step guide to connect marketplaces",
            duration: "10 min read",
            category: "Tutorial",
        },
        Resource {
            title: "Repricing Strategies",
            description: "Best practices for automated pricing optimization",
            duration: "20 min read",
            category: "Guide",
        },
        Resource {
            title: "Analytics Dashboard",
            description: "Understanding your metrics and reports",
            duration: "12 min read",
            category: "Tutorial",
        },
        Resource {
            title: "API Documentation",
            description: "Developer documentation for integrations",
            duration: "Reference",
            category: "API",
        },
        Resource {
            title: "Video Tutorials",
            description: "Watch feature demonstrations",
            duration: "5-20 min each",
            category: "Video",
        },
    ]
}

/// A tab on the demo page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoFeature {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: Vec<&'static str>,
}

#[must_use]
pub fn demo_features() -> Vec<DemoFeature> {
    vec![
        DemoFeature {
            id: "dashboard",
            title: "Analytics Dashboard",
            description: "Real-time insights across all your marketplaces",
            highlights: vec![
                "Multi-marketplace performance tracking",
                "Revenue and profit analytics",
                "Inventory level monitoring",
                "Competitor price alerts",
            ],
        },
        DemoFeature {
            id: "repricing",
            title: "Automated Repricing",
            description: "Smart pricing rules that maximize profits",
            highlights: vec![
                "MRP-based pricing strategies",
                "Competitor-aware adjustments",
                "Margin protection rules",
                "A/B testing capabilities",
            ],
        },
        DemoFeature {
            id: "analytics",
            title: "Turnover Calculator",
            description: "Comprehensive business intelligence tools",
            highlights: vec![
                "Interactive turnover calculator",
                "Profit margin optimization",
                "Growth opportunity analysis",
                "Export to CSV",
            ],
        },
        DemoFeature {
            id: "inventory",
            title: "Inventory Management",
            description: "Advanced SKU and stock level optimization",
            highlights: vec![
                "Multi-location inventory sync",
                "Automated reorder points",
                "Dead stock identification",
                "Demand forecasting",
            ],
        },
    ]
}

#[must_use]
pub fn demo_stats() -> Vec<Stat> {
    vec![
        Stat { value: "10,000+", label: "Active Users" },
        Stat { value: "₹500Cr+", label: "Revenue Managed" },
        Stat { value: "1M+", label: "Products Tracked" },
        Stat { value: "99.9%", label: "Uptime" },
    ]
}

/// Cards on the signed-in dashboard.
#[must_use]
pub fn dashboard_benefits() -> Vec<Feature> {
    vec![
        Feature {
            title: "Pricing Automation",
            description: "Real-time auto-repricing across eCommerce platforms.",
        },
        Feature {
            title: "Turnover Analytics",
            description: "Evaluate profits, SKUs, and sales performance instantly.",
        },
        Feature {
            title: "Competitor Tracking",
            description: "Monitor competitor prices 24/7 with alerts.",
        },
        Feature {
            title: "Inventory Sync",
            description: "Get real-time stock updates to avoid overselling.",
        },
    ]
}

/// A checkbox on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[must_use]
pub fn service_options() -> Vec<ServiceOption> {
    ServiceTag::ALL
        .iter()
        .map(|tag| ServiceOption {
            value: tag.as_str(),
            label: tag.label(),
            description: tag.description(),
        })
        .collect()
}

/// Position in a list of tab ids, falling back to the first tab.
#[must_use]
pub fn tab_index<'a>(ids: impl IntoIterator<Item = &'a str>, wanted: Option<&str>) -> usize {
    wanted
        .and_then(|wanted| ids.into_iter().position(|id| id == wanted))
        .unwrap_or(0)
}
