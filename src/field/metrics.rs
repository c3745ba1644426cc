use crate::render::canvas::{ColorError, Rgb};
use strum::{Display, EnumIter};

/// The ten sustainability metrics, one per thread. Declaration order is
/// thread creation order and decides which thread wins a contested hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub(crate) enum Metric {
    #[strum(to_string = "Water Use")]
    WaterUse,
    #[strum(to_string = "Household Waste")]
    HouseholdWaste,
    #[strum(to_string = "Waste Sorting")]
    WasteSorting,
    #[strum(to_string = "Composting")]
    Composting,
    #[strum(to_string = "Non-Degradable Waste")]
    NonDegradableWaste,
    #[strum(to_string = "Eco Purchases")]
    EcoPurchases,
    #[strum(to_string = "Recycle Rate")]
    RecycleRate,
    #[strum(to_string = "Energy Use")]
    EnergyUse,
    #[strum(to_string = "Reuse Actions")]
    ReuseActions,
    #[strum(to_string = "Repair Actions")]
    RepairActions,
}

/// Deep Winter backdrop, also the opaque legend band fill.
pub(crate) const BACKGROUND: Rgb = Rgb::new(0x10, 0x00, 0x2D);

/// One palette entry per metric, in metric order.
const PALETTE: [&str; 10] = [
    "#10002D", "#99035A", "#017A97", "#F31B86", "#53FFFF",
    "#04CED8", "#C26DAE", "#524678", "#FFC3FF", "#9AC3D7",
];

/// Parse the palette into colors. The constants are fixed at compile time,
/// but parsing stays fallible so a bad edit surfaces at startup instead of
/// drawing garbage.
pub(crate) fn palette() -> Result<Vec<Rgb>, ColorError> {
    PALETTE.iter().map(|hex| Rgb::from_hex(hex)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn one_palette_entry_per_metric() {
        let colors = palette().expect("failed to parse palette");
        assert_eq!(colors.len(), Metric::iter().count());
    }

    #[test]
    fn palette_round_trips_through_hex() {
        let colors = palette().expect("failed to parse palette");
        for (color, hex) in colors.iter().zip(PALETTE) {
            assert_eq!(color.to_hex(), hex);
        }
    }

    #[test]
    fn metric_labels_match_display_names() {
        assert_eq!(Metric::WaterUse.to_string(), "Water Use");
        assert_eq!(Metric::NonDegradableWaste.to_string(), "Non-Degradable Waste");
        assert_eq!(Metric::RepairActions.to_string(), "Repair Actions");
    }
}
