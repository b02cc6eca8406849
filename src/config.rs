//! Static chart catalog and styling configuration.
//!
//! This is the entire configuration surface: an in-process list of per-chart
//! parameter tuples plus the color/label lookups handed to the renderers.
//! There is no configuration file, and no flag alters chart content.

use crate::domain::{ChartKind, ChartSpec, Palette, Rgb, ValueFormat};

/// Headline entities drawn on every indicator chart.
pub const HEADLINE_GEOS: &[&str] = &["EL", "EU27_2020"];

/// Fixed reference-entity-set averaged into the synthetic comparison series.
pub const REFERENCE_GEOS: &[&str] = &[
    "BG", "HU", "LV", "HR", "PL", "LT", "SK", "EE", "CZ", "RO",
];

/// Sentinel entity key for the computed reference-set average. Never present
/// in the source data.
pub const REFERENCE_AVG_KEY: &str = "Bottom_10_Avg";

/// How many categories the sectoral chart keeps.
pub const TOP_SECTORS: usize = 7;

/// Colors and display names for the indicator series.
pub const INDICATOR_PALETTE: Palette = Palette {
    colors: &[
        ("EL", Rgb(0x1B, 0x3C, 0x69)),
        ("EU27_2020", Rgb(0x4A, 0x4A, 0x4A)),
        (REFERENCE_AVG_KEY, Rgb(0x90, 0x16, 0x28)),
    ],
    labels: &[
        ("EL", "Greece"),
        ("EU27_2020", "EU27 (2020)"),
        (REFERENCE_AVG_KEY, "Bottom 10 Avg"),
    ],
    fallback: Rgb(0x80, 0x80, 0x80),
};

/// NACE section codes mapped to display labels. Codes without an entry are
/// dropped by the selector.
pub const SECTOR_LABELS: &[(&str, &str)] = &[
    ("A", "Γεωργία, Δασοκομία και Αλιεία"),
    ("C", "Μεταποιητική Βιομηχανία"),
    ("L", "Ακίνητα"),
    ("O", "Δημόσια Διοίκηση και Άμυνα"),
    ("H", "Μεταφορές και Αποθήκευση"),
    ("G", "Χονδρικό και Λιανικό Εμπόριο"),
    ("J", "Πληροφορική και Επικοινωνίες"),
];

/// Sector series are keyed by display label, so the palette needs no label
/// table of its own.
pub const SECTOR_PALETTE: Palette = Palette {
    colors: &[
        ("Ακίνητα", Rgb(0x1B, 0x3C, 0x69)),
        ("Μεταποιητική Βιομηχανία", Rgb(0xA6, 0x19, 0x2E)),
        ("Δημόσια Διοίκηση και Άμυνα", Rgb(0x2E, 0x7D, 0x32)),
        ("Μεταφορές και Αποθήκευση", Rgb(0x4A, 0x4A, 0x4A)),
        ("Χονδρικό και Λιανικό Εμπόριο", Rgb(0x6D, 0x82, 0x99)),
        ("Γεωργία, Δασοκομία και Αλιεία", Rgb(0xD4, 0xA0, 0x17)),
        ("Πληροφορική και Επικοινωνίες", Rgb(0x8B, 0x5E, 0x3C)),
    ],
    labels: &[],
    fallback: Rgb(0x80, 0x80, 0x80),
};

/// The chart catalog, rendered in order by the batch front-end.
pub const CHARTS: &[ChartSpec] = &[
    ChartSpec {
        dataset: "tepsr_wc310",
        title: "Real Gross Disposable Income Per Capita",
        subtitle: "Index (2008 = 100)",
        y_label: "Index (2008 = 100)",
        unit: Some("CP_MNAC"),
        filter: None,
        y_format: ValueFormat::Plain,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "sdg_10_10",
        title: "Real GDP Per Capita (PPS)",
        subtitle: "Purchasing Power Standards (Base Year 2020)",
        y_label: "PPS",
        unit: None,
        filter: Some(("na_item", "EXP_PPS_EU27_2020_HAB")),
        y_format: ValueFormat::Plain,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipsna40",
        title: "Real GDP Per Capita",
        subtitle: "EUR (2015 constant prices)",
        y_label: "EUR (2015)",
        unit: Some("CLV15_EUR_HAB"),
        filter: None,
        y_format: ValueFormat::Plain,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipsgo10",
        title: "General Government Gross Debt",
        subtitle: "% of GDP",
        y_label: "% GDP",
        unit: Some("PC_GDP"),
        filter: None,
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipsbp20",
        title: "Current Account Balance",
        subtitle: "% of GDP",
        y_label: "% GDP",
        unit: Some("PC_GDP"),
        filter: Some(("bop_item", "CA")),
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipsun20",
        title: "Youth Unemployment Rate (15-24)",
        subtitle: "% of Labour Force",
        y_label: "% Labour Force",
        unit: None,
        filter: Some(("age", "Y15-24")),
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipsun20",
        title: "Total Unemployment Rate (15-74)",
        subtitle: "% of Labour Force",
        y_label: "% Labour Force",
        unit: None,
        filter: Some(("age", "Y15-74")),
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "lfsa_eoqgan",
        title: "Over-Qualification Rate",
        subtitle: "% of Employees",
        y_label: "% Employees",
        unit: None,
        filter: Some(("citizen", "TOTAL")),
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "tipslc10",
        title: "People at Risk of Poverty or Social Exclusion",
        subtitle: "% of Population",
        y_label: "% Population",
        unit: Some("PC"),
        filter: None,
        y_format: ValueFormat::Percent,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "nama_10_lp_ulc",
        title: "Compensation of Employees Per Hour Worked",
        subtitle: "Nominal Values",
        y_label: "EUR",
        unit: Some("EUR"),
        filter: Some(("na_item", "D1_SAL_HW")),
        y_format: ValueFormat::Plain,
        kind: ChartKind::Indicator,
    },
    ChartSpec {
        dataset: "nama_10_a64_p5",
        title: "Sectoral Investment (EL)",
        subtitle: "Top 7 industries by gross capital formation",
        y_label: "CLV15_MEUR",
        unit: Some("CLV15_MEUR"),
        filter: Some(("asset10", "N11G")),
        y_format: ValueFormat::Plain,
        kind: ChartKind::Sectoral { geo: "EL" },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_well_formed() {
        assert!(!CHARTS.is_empty());
        for spec in CHARTS {
            assert!(!spec.dataset.is_empty());
            assert!(!spec.title.is_empty());
        }
        // Exactly one sectoral entry, and it pins the expected filters.
        let sectoral: Vec<_> = CHARTS
            .iter()
            .filter(|s| matches!(s.kind, ChartKind::Sectoral { .. }))
            .collect();
        assert_eq!(sectoral.len(), 1);
        assert_eq!(sectoral[0].unit, Some("CLV15_MEUR"));
        assert_eq!(sectoral[0].filter, Some(("asset10", "N11G")));
    }

    #[test]
    fn every_sector_label_has_a_color() {
        for (_, label) in SECTOR_LABELS {
            assert!(
                SECTOR_PALETTE.colors.iter().any(|(k, _)| k == label),
                "missing color for sector label {label}"
            );
        }
    }
}
