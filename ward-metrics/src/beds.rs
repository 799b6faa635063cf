use ward_core::{Bed, BedRosterEntry, BedStatistics, BedStatus, Patient};

use crate::lookup::resolve_patient_name;
use crate::rate::rate;

/// Per-status bed counts and the occupied share.
///
/// Beds with an unknown status only count toward `total`.
pub fn compute_bed_statistics<'a, I>(beds: I) -> BedStatistics
where
    I: IntoIterator<Item = &'a Bed>,
{
    let mut stats = BedStatistics::default();
    for bed in beds {
        stats.total += 1;
        match bed.status {
            Some(BedStatus::Available) => stats.available += 1,
            Some(BedStatus::Occupied) => stats.occupied += 1,
            Some(BedStatus::Cleaning) => stats.cleaning += 1,
            Some(BedStatus::Maintenance) => stats.maintenance += 1,
            None => {}
        }
    }
    stats.occupancy_rate = rate(stats.occupied, stats.total);
    stats
}

/// Bed grid with each occupant's name resolved.
pub fn bed_roster(beds: &[Bed], patients: &[Patient]) -> Vec<BedRosterEntry> {
    beds.iter()
        .map(|bed| BedRosterEntry {
            bed_id: bed.id.clone(),
            ward: bed.ward.clone(),
            number: bed.number.clone(),
            status: bed.status,
            patient_name: bed
                .patient_id
                .as_ref()
                .map(|patient_id| resolve_patient_name(patients, patient_id)),
        })
        .collect()
}
