use thiserror::Error;

/// Opaque handle to the picture shown on the dessert button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef {
    pub name: &'static str,
    pub glyph: &'static str,
}

impl ImageRef {
    pub const fn new(name: &'static str, glyph: &'static str) -> Self {
        Self { name, glyph }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub image: ImageRef,
    pub unit_price: u64,
    /// Cumulative units sold at which this tier becomes active.
    pub activation_threshold: u64,
}

impl Tier {
    pub const fn new(image: ImageRef, unit_price: u64, activation_threshold: u64) -> Self {
        Self {
            image,
            unit_price,
            activation_threshold,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no tiers")]
    Empty,

    #[error("first tier must activate at 0 units, found {0}")]
    FirstThresholdNotZero(u64),

    #[error("tier {index} activates at {threshold}, below the previous tier's {previous}")]
    DecreasingThreshold {
        index: usize,
        threshold: u64,
        previous: u64,
    },
}

/// Ordered, immutable list of dessert tiers.
#[derive(Debug, Clone)]
pub struct Catalog {
    tiers: Vec<Tier>,
}

impl Catalog {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, CatalogError> {
        Self::validate(&tiers)?;
        Ok(Self { tiers })
    }

    /// The desserts sold in the bakery, cheapest first.
    pub fn desserts() -> Self {
        let tiers = vec![
            Tier::new(ImageRef::new("Cupcake", "🧁"), 5, 0),
            Tier::new(ImageRef::new("Donut", "🍩"), 10, 5),
            Tier::new(ImageRef::new("Eclair", "🥖"), 15, 20),
            Tier::new(ImageRef::new("Froyo", "🍦"), 30, 50),
            Tier::new(ImageRef::new("Gingerbread", "🍪"), 50, 100),
            Tier::new(ImageRef::new("Honeycomb", "🍯"), 100, 200),
            Tier::new(ImageRef::new("Ice Cream Sandwich", "🍨"), 500, 500),
            Tier::new(ImageRef::new("Jellybean", "🫘"), 1000, 1000),
            Tier::new(ImageRef::new("KitKat", "🍫"), 2000, 2000),
            Tier::new(ImageRef::new("Lollipop", "🍭"), 3000, 4000),
            Tier::new(ImageRef::new("Marshmallow", "☁️"), 4000, 8000),
            Tier::new(ImageRef::new("Nougat", "🥜"), 5000, 16000),
            Tier::new(ImageRef::new("Oreo", "🍘"), 6000, 20000),
        ];
        Self::new(tiers).unwrap_or_else(|err| panic!("built-in dessert catalog is invalid: {err}"))
    }

    fn validate(tiers: &[Tier]) -> Result<(), CatalogError> {
        let first = tiers.first().ok_or(CatalogError::Empty)?;
        if first.activation_threshold != 0 {
            return Err(CatalogError::FirstThresholdNotZero(first.activation_threshold));
        }

        for (index, pair) in tiers.windows(2).enumerate() {
            let (previous, tier) = (&pair[0], &pair[1]);
            if tier.activation_threshold < previous.activation_threshold {
                return Err(CatalogError::DecreasingThreshold {
                    index: index + 1,
                    threshold: tier.activation_threshold,
                    previous: previous.activation_threshold,
                });
            }
        }
        Ok(())
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }
}

/// Index of the last tier whose threshold has been reached.
pub fn resolve_tier(catalog: &Catalog, units_sold: u64) -> usize {
    let mut active = 0;
    for (index, tier) in catalog.tiers().iter().enumerate() {
        if units_sold < tier.activation_threshold {
            break;
        }
        active = index;
    }
    active
}

#[cfg(test)]
pub(crate) fn three_tier_catalog() -> Catalog {
    Catalog::new(vec![
        Tier::new(ImageRef::new("Cupcake", "🧁"), 5, 0),
        Tier::new(ImageRef::new("Donut", "🍩"), 10, 5),
        Tier::new(ImageRef::new("Eclair", "🥖"), 15, 20),
    ])
    .expect("valid test catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::desserts();

        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.tiers()[0].image.name, "Cupcake");
        assert_eq!(catalog.tiers().get(12).map(|t| t.unit_price), Some(6000));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_rejects_nonzero_first_threshold() {
        let err = Catalog::new(vec![Tier::new(ImageRef::new("Donut", "🍩"), 10, 5)]).unwrap_err();
        assert_eq!(err, CatalogError::FirstThresholdNotZero(5));
    }

    #[test]
    fn test_rejects_decreasing_thresholds() {
        let err = Catalog::new(vec![
            Tier::new(ImageRef::new("Cupcake", "🧁"), 5, 0),
            Tier::new(ImageRef::new("Donut", "🍩"), 10, 20),
            Tier::new(ImageRef::new("Eclair", "🥖"), 15, 10),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            CatalogError::DecreasingThreshold {
                index: 2,
                threshold: 10,
                previous: 20
            }
        );
    }

    #[test]
    fn test_equal_thresholds_are_allowed() {
        let catalog = Catalog::new(vec![
            Tier::new(ImageRef::new("Cupcake", "🧁"), 5, 0),
            Tier::new(ImageRef::new("Donut", "🍩"), 10, 5),
            Tier::new(ImageRef::new("Eclair", "🥖"), 15, 5),
        ])
        .unwrap();

        // The later of two tiers sharing a threshold wins.
        assert_eq!(resolve_tier(&catalog, 5), 2);
        assert_eq!(resolve_tier(&catalog, 4), 0);
    }

    #[test]
    fn test_resolve_tier_boundaries() {
        let catalog = three_tier_catalog();

        assert_eq!(resolve_tier(&catalog, 0), 0);
        assert_eq!(resolve_tier(&catalog, 4), 0);
        assert_eq!(resolve_tier(&catalog, 5), 1);
        assert_eq!(resolve_tier(&catalog, 19), 1);
        assert_eq!(resolve_tier(&catalog, 20), 2);
        assert_eq!(resolve_tier(&catalog, u64::MAX), 2);
    }

    #[test]
    fn test_resolve_tier_builtin_milestones() {
        let catalog = Catalog::desserts();

        assert_eq!(catalog.tiers()[resolve_tier(&catalog, 499)].image.name, "Honeycomb");
        assert_eq!(catalog.tiers()[resolve_tier(&catalog, 500)].image.name, "Ice Cream Sandwich");
        assert_eq!(catalog.tiers()[resolve_tier(&catalog, 3999)].image.name, "KitKat");
        assert_eq!(catalog.tiers()[resolve_tier(&catalog, 20000)].image.name, "Oreo");
    }

    /// Valid catalogs: first threshold 0, later ones rising by gaps that may be
    /// 0 so neighbouring tiers can share a threshold.
    fn arb_catalog() -> impl Strategy<Value = Catalog> {
        prop::collection::vec((1u64..100, 0u64..50), 1..12).prop_map(|steps| {
            let mut threshold = 0;
            let tiers = steps
                .into_iter()
                .enumerate()
                .map(|(i, (price, gap))| {
                    if i > 0 {
                        threshold += gap;
                    }
                    Tier::new(ImageRef::new("Dessert", "🍰"), price, threshold)
                })
                .collect();
            Catalog::new(tiers).unwrap()
        })
    }

    proptest! {
        #[test]
        fn resolved_tier_is_unique_for_any_catalog(catalog in arb_catalog(), units in 0u64..700) {
            let index = resolve_tier(&catalog, units);
            let expected = catalog
                .tiers()
                .iter()
                .rposition(|tier| tier.activation_threshold <= units)
                .unwrap();

            prop_assert_eq!(index, expected);
        }

        #[test]
        fn resolved_tier_is_monotonic_for_any_catalog(catalog in arb_catalog(), a in 0u64..700, b in 0u64..700) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resolve_tier(&catalog, low) <= resolve_tier(&catalog, high));
        }

        #[test]
        fn resolved_tier_is_last_reached_threshold(units in 0u64..40_000) {
            let catalog = Catalog::desserts();
            let index = resolve_tier(&catalog, units);
            let tiers = catalog.tiers();

            prop_assert!(tiers[index].activation_threshold <= units);
            if let Some(next) = tiers.get(index + 1) {
                prop_assert!(next.activation_threshold > units);
            }
        }

        #[test]
        fn resolved_tier_is_monotonic(a in 0u64..40_000, b in 0u64..40_000) {
            let catalog = Catalog::desserts();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resolve_tier(&catalog, low) <= resolve_tier(&catalog, high));
        }
    }
}
