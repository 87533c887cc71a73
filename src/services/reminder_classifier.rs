//! Clasificación de recordatorios
//!
//! Deriva el estado de un recordatorio (Overdue, DueSoon, Upcoming,
//! Completed) a partir de sus umbrales de fecha y kilometraje, el
//! kilometraje actual del vehículo y el instante `now`. Función pura:
//! no valida ni falla.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Reminder, ReminderStatus, VehicleWithServices};

/// Ventana de "pronto" por fecha (inclusiva en ambos extremos)
pub const DUE_SOON_DAYS: i64 = 30;

/// Ventana de "pronto" por kilometraje: distancia restante en (0, 1000]
pub const DUE_SOON_MILES: i64 = 1000;

/// Clasificar un recordatorio contra el kilometraje de su vehículo
pub fn classify(reminder: &Reminder, current_mileage: i64, now: DateTime<Utc>) -> ReminderStatus {
    if reminder.is_completed {
        return ReminderStatus::Completed;
    }

    if is_overdue(reminder, current_mileage, now) {
        return ReminderStatus::Overdue;
    }

    if is_due_soon(reminder, current_mileage, now) {
        return ReminderStatus::DueSoon;
    }

    ReminderStatus::Upcoming
}

// Fecha vencida O kilometraje alcanzado, lo que ocurra primero
fn is_overdue(reminder: &Reminder, current_mileage: i64, now: DateTime<Utc>) -> bool {
    let by_date = reminder.due_date.is_some_and(|due| due < now);
    let by_mileage = reminder
        .due_mileage
        .is_some_and(|due| current_mileage >= due);

    by_date || by_mileage
}

fn is_due_soon(reminder: &Reminder, current_mileage: i64, now: DateTime<Utc>) -> bool {
    let horizon = now + Duration::days(DUE_SOON_DAYS);
    let by_date = reminder
        .due_date
        .is_some_and(|due| now <= due && due <= horizon);
    // Entradas fuera de rango no fallan: sin distancia calculable no hay "pronto"
    let by_mileage = reminder.due_mileage.is_some_and(|due| {
        due.checked_sub(current_mileage)
            .is_some_and(|remaining| remaining > 0 && remaining <= DUE_SOON_MILES)
    });

    by_date || by_mileage
}

/// Clasificar todos los recordatorios de un vehículo, los más urgentes primero.
/// El orden relativo dentro de un mismo estado se conserva.
pub fn classify_vehicle(
    vehicle: &VehicleWithServices,
    now: DateTime<Utc>,
) -> Vec<(&Reminder, ReminderStatus)> {
    let mut classified: Vec<_> = vehicle
        .reminders
        .iter()
        .map(|r| (r, classify(r, vehicle.vehicle.mileage, now)))
        .collect();

    // sort_by_key es estable
    classified.sort_by_key(|(_, status)| *status);
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServiceType, Vehicle};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn reminder(due_date: Option<DateTime<Utc>>, due_mileage: Option<i64>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            service_type: ServiceType::OilChange,
            description: "Next oil change due".to_string(),
            due_date,
            due_mileage,
            is_completed: false,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_completed_wins_over_everything() {
        let mut r = reminder(Some(now() - Duration::days(400)), Some(10));
        r.is_completed = true;
        assert_eq!(classify(&r, 999_999, now()), ReminderStatus::Completed);

        let mut r = reminder(None, None);
        r.is_completed = true;
        assert_eq!(classify(&r, 0, now()), ReminderStatus::Completed);
    }

    #[test]
    fn test_mileage_thresholds() {
        let r = reminder(None, Some(50_000));
        assert_eq!(classify(&r, 50_000, now()), ReminderStatus::Overdue);
        assert_eq!(classify(&r, 51_000, now()), ReminderStatus::Overdue);
        assert_eq!(classify(&r, 49_500, now()), ReminderStatus::DueSoon);
        assert_eq!(classify(&r, 49_000, now()), ReminderStatus::DueSoon);
        assert_eq!(classify(&r, 48_999, now()), ReminderStatus::Upcoming);
        assert_eq!(classify(&r, 48_000, now()), ReminderStatus::Upcoming);
    }

    #[test]
    fn test_due_date_equal_to_now_is_due_soon() {
        let r = reminder(Some(now()), None);
        assert_eq!(classify(&r, 0, now()), ReminderStatus::DueSoon);
    }

    #[test]
    fn test_date_thresholds() {
        let past = reminder(Some(now() - Duration::seconds(1)), None);
        assert_eq!(classify(&past, 0, now()), ReminderStatus::Overdue);

        let edge = reminder(Some(now() + Duration::days(30)), None);
        assert_eq!(classify(&edge, 0, now()), ReminderStatus::DueSoon);

        let beyond = reminder(Some(now() + Duration::days(30) + Duration::seconds(1)), None);
        assert_eq!(classify(&beyond, 0, now()), ReminderStatus::Upcoming);
    }

    #[test]
    fn test_either_threshold_makes_it_overdue() {
        // Fecha lejana pero kilometraje alcanzado
        let r = reminder(Some(now() + Duration::days(300)), Some(60_000));
        assert_eq!(classify(&r, 60_000, now()), ReminderStatus::Overdue);

        // Kilometraje lejano pero fecha vencida
        let r = reminder(Some(now() - Duration::days(1)), Some(90_000));
        assert_eq!(classify(&r, 10_000, now()), ReminderStatus::Overdue);
    }

    #[test]
    fn test_either_threshold_makes_it_due_soon() {
        let r = reminder(Some(now() + Duration::days(300)), Some(60_500));
        assert_eq!(classify(&r, 60_000, now()), ReminderStatus::DueSoon);

        let r = reminder(Some(now() + Duration::days(10)), Some(90_000));
        assert_eq!(classify(&r, 10_000, now()), ReminderStatus::DueSoon);
    }

    #[test]
    fn test_without_thresholds_is_always_upcoming() {
        let r = reminder(None, None);
        assert_eq!(classify(&r, 0, now()), ReminderStatus::Upcoming);
        assert_eq!(classify(&r, i64::MAX, now()), ReminderStatus::Upcoming);
    }

    #[test]
    fn test_out_of_range_mileage_does_not_panic() {
        let r = reminder(None, Some(i64::MAX));
        assert_eq!(classify(&r, -1, now()), ReminderStatus::Upcoming);

        let r = reminder(None, Some(i64::MIN));
        assert_eq!(classify(&r, 1, now()), ReminderStatus::Overdue);
    }

    #[test]
    fn test_classify_vehicle_orders_by_urgency() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id: "demo-user".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            vin: None,
            mileage: 45_000,
            color: None,
            plate_number: None,
            created_at: now(),
            updated_at: now(),
        };
        let mut v = VehicleWithServices::new(vehicle);
        let upcoming = reminder(None, Some(48_000));
        let overdue = reminder(None, Some(44_000));
        let soon = reminder(None, Some(45_500));
        v.reminders = vec![upcoming.clone(), overdue.clone(), soon.clone()];

        let classified = classify_vehicle(&v, now());
        let ids: Vec<Uuid> = classified.iter().map(|(r, _)| r.id).collect();
        assert_eq!(ids, vec![overdue.id, soon.id, upcoming.id]);
        assert_eq!(classified[0].1, ReminderStatus::Overdue);
        assert_eq!(classified[2].1, ReminderStatus::Upcoming);
    }
}
