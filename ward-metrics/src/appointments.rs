use chrono::{DateTime, FixedOffset, Utc};
use ward_core::time::local_day;
use ward_core::{
    Appointment, AppointmentRates, AppointmentRosterEntry, AppointmentStatus, Patient,
    UNKNOWN_PATIENT,
};

use crate::lookup::resolve_patient_name;
use crate::rate::rate;

/// Counters of the appointments page.
///
/// `today` compares local calendar days, `upcoming` is strictly after
/// `reference`. Appointments without a usable date count in neither.
pub fn compute_appointment_rates(
    appointments: &[Appointment],
    reference: DateTime<Utc>,
    offset: &FixedOffset,
) -> AppointmentRates {
    let today = local_day(reference, offset);
    let mut rates = AppointmentRates {
        total: appointments.len(),
        ..AppointmentRates::default()
    };

    for appointment in appointments {
        if let Some(scheduled) = appointment.date_time {
            if local_day(scheduled, offset) == today {
                rates.today += 1;
            }
            if scheduled > reference {
                rates.upcoming += 1;
            }
        }
        match appointment.status {
            Some(AppointmentStatus::Completed) => rates.completed += 1,
            Some(AppointmentStatus::Cancelled) => rates.cancelled += 1,
            _ => {}
        }
    }

    rates.completion_rate = rate(rates.completed, rates.total);
    rates
}

pub fn appointment_roster(
    appointments: &[Appointment],
    patients: &[Patient],
) -> Vec<AppointmentRosterEntry> {
    appointments
        .iter()
        .map(|appointment| AppointmentRosterEntry {
            appointment_id: appointment.id.clone(),
            date_time: appointment.date_time,
            status: appointment.status,
            department: appointment.department.clone(),
            patient_name: match &appointment.patient_id {
                Some(patient_id) => resolve_patient_name(patients, patient_id),
                None => UNKNOWN_PATIENT.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ward_core::time::parse_timestamp;
    use ward_core::RecordId;

    fn appointment(id: &str, at: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: RecordId::from(id),
            date_time: parse_timestamp(at),
            status: Some(status),
            ..Appointment::default()
        }
    }

    #[test]
    fn today_and_upcoming_overlap() {
        let appointments = vec![
            appointment("a", "2024-01-17T08:00:00Z", AppointmentStatus::Completed),
            appointment("b", "2024-01-17T15:00:00Z", AppointmentStatus::Confirmed),
            appointment("c", "2024-01-20T09:00:00Z", AppointmentStatus::Pending),
            appointment("d", "garbage", AppointmentStatus::Cancelled),
        ];
        let reference = Utc.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        let rates = compute_appointment_rates(&appointments, reference, &utc);
        assert_eq!(rates.total, 4);
        assert_eq!(rates.today, 2);
        assert_eq!(rates.upcoming, 2);
        assert_eq!(rates.completed, 1);
        assert_eq!(rates.cancelled, 1);
        assert_eq!(rates.completion_rate, 25);
    }

    #[test]
    fn no_appointments_no_rate() {
        let reference = Utc.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            compute_appointment_rates(&[], reference, &utc),
            AppointmentRates::default()
        );
    }

    #[test]
    fn roster_falls_back_for_missing_reference() {
        let appointments = vec![appointment("a", "2024-01-17", AppointmentStatus::Pending)];
        let roster = appointment_roster(&appointments, &[]);
        assert_eq!(roster[0].patient_name, UNKNOWN_PATIENT);
    }
}
