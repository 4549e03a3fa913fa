//! Attendance rules
//!
//! Turns reader scans and admin actions into card and punch records.
//!
//! # Scan rules
//!
//! ```text
//! scan(uid, mode)
//!   unknown card                       -> UnknownCard (nothing written)
//!   last punch younger than debounce   -> Debounced
//!   Arrival, last punch is In          -> AlreadyIn
//!   Arrival                            -> In punch, card marked present
//!   Leave(kind)                        -> leave punch, card marked present
//! ```
//!
//! Each operation runs in one database transaction, so two scans of the same
//! card cannot both pass the debounce check.

use crate::attendance::{AttendanceError, AttendanceResult};
use crate::storage::{
    card_number_from_uid, now_millis, queries, Card, CardUpdate, Database, Punch,
    PunchLogEntry, PunchStatus,
};
use serde::Serialize;
use std::sync::Arc;

/// Tunables of the attendance rules
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    /// Repeated scans of one card within this window (inclusive) are
    /// ignored. The default ignores anything under two whole seconds.
    pub debounce_ms: i64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self { debounce_ms: 1_999 }
    }
}

/// What a scan is meant to record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Regular arrival scan
    Arrival,
    /// Leave scan with an optional leave kind (a message key)
    Leave(Option<String>),
}

/// Result of a reader scan
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    UnknownCard { card_number: String },
    Debounced { card: Card },
    AlreadyIn { card: Card },
    PunchedIn { card: Card, punch: Punch },
    LeaveRecorded { card: Card, punch: Punch },
}

/// Result of an explicit leave registration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeaveRegistration {
    pub card: Card,
    /// `None` when the same leave was registered within the debounce window
    pub punch: Option<Punch>,
}

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Attendance service over the card store
pub struct AttendanceService {
    db: Arc<Database>,
    config: AttendanceConfig,
    clock: Clock,
}

impl AttendanceService {
    pub fn new(db: Arc<Database>, config: AttendanceConfig) -> Self {
        Self {
            db,
            config,
            clock: Arc::new(now_millis),
        }
    }

    /// Replace the wall clock (milliseconds since epoch)
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Apply a reader scan
    pub fn scan(&self, uid: &[u8], mode: ScanMode) -> AttendanceResult<ScanOutcome> {
        let card_number = card_number_from_uid(uid);
        if card_number.is_empty() {
            return Err(AttendanceError::InvalidCardNumber(card_number));
        }

        let now = (self.clock)();
        let debounce_ms = self.config.debounce_ms;

        let outcome = self.db.write(|tx| {
            let Some(card) = queries::find_card_by_number(tx, &card_number)? else {
                return Ok(ScanOutcome::UnknownCard {
                    card_number: card_number.clone(),
                });
            };

            let last = queries::last_punch(tx, card.id)?;
            if let Some(punch) = &last {
                if punch.age_ms(now) <= debounce_ms {
                    return Ok(ScanOutcome::Debounced { card });
                }
            }

            match mode {
                ScanMode::Arrival => {
                    if matches!(&last, Some(p) if p.status == PunchStatus::In) {
                        return Ok(ScanOutcome::AlreadyIn { card });
                    }
                    let punch = queries::insert_punch(tx, card.id, &PunchStatus::In, now)?;
                    queries::set_presence(tx, card.id, true, now)?;
                    Ok(ScanOutcome::PunchedIn {
                        card: present(card, now),
                        punch,
                    })
                }
                ScanMode::Leave(kind) => {
                    let status = PunchStatus::leave(kind.as_deref());
                    let punch = queries::insert_punch(tx, card.id, &status, now)?;
                    queries::set_presence(tx, card.id, true, now)?;
                    Ok(ScanOutcome::LeaveRecorded {
                        card: present(card, now),
                        punch,
                    })
                }
            }
        })?;

        log_scan(&outcome);
        Ok(outcome)
    }

    /// Return the card registered under `card_number`, registering it if new
    pub fn find_or_create_card(&self, card_number: &str) -> AttendanceResult<Card> {
        let card_number = normalize_card_number(card_number)?;
        let now = (self.clock)();

        let (card, created) = self.db.write(|tx| {
            match queries::find_card_by_number(tx, &card_number)? {
                Some(card) => Ok((card, false)),
                None => Ok((queries::insert_card(tx, &card_number, now)?, true)),
            }
        })?;

        if created {
            tracing::info!(card_number = %card.card_number, card_id = card.id, "Registered new card");
        }
        Ok(card)
    }

    /// Register a leave for a card, marking its holder present
    pub fn register_leave(
        &self,
        card_number: &str,
        kind: Option<&str>,
    ) -> AttendanceResult<LeaveRegistration> {
        let card_number = normalize_card_number(card_number)?;
        let status = PunchStatus::leave(kind);
        let now = (self.clock)();
        let debounce_ms = self.config.debounce_ms;

        let registration = self.db.write(|tx| {
            let Some(card) = queries::find_card_by_number(tx, &card_number)? else {
                return Ok(None);
            };
            queries::set_presence(tx, card.id, true, now)?;

            let duplicate = match queries::last_punch(tx, card.id)? {
                Some(last) => last.status == status && last.age_ms(now) <= debounce_ms,
                None => false,
            };
            let punch = if duplicate {
                None
            } else {
                Some(queries::insert_punch(tx, card.id, &status, now)?)
            };

            Ok(Some(LeaveRegistration {
                card: present(card, now),
                punch,
            }))
        })?;

        let registration =
            registration.ok_or_else(|| AttendanceError::CardNotFound(card_number.clone()))?;
        tracing::info!(
            card_number = %card_number,
            leave = %status,
            recorded = registration.punch.is_some(),
            "Leave registered"
        );
        Ok(registration)
    }

    /// Clock a card out
    pub fn punch_out(&self, card_number: &str) -> AttendanceResult<Punch> {
        let card_number = normalize_card_number(card_number)?;
        let now = (self.clock)();

        let punch = self.db.write(|tx| {
            let Some(card) = queries::find_card_by_number(tx, &card_number)? else {
                return Ok(None);
            };
            queries::set_presence(tx, card.id, false, now)?;
            Ok(Some(queries::insert_punch(tx, card.id, &PunchStatus::Out, now)?))
        })?;

        let punch = punch.ok_or_else(|| AttendanceError::CardNotFound(card_number.clone()))?;
        tracing::info!(card_number = %card_number, "Punch out registered");
        Ok(punch)
    }

    /// All cards with their presence flags
    pub fn overview(&self) -> AttendanceResult<Vec<Card>> {
        Ok(self.db.read(queries::list_cards)?)
    }

    /// All punches with card data, newest first
    pub fn punch_log(&self) -> AttendanceResult<Vec<PunchLogEntry>> {
        Ok(self.db.read(queries::punch_log)?)
    }

    /// Remove every punch. Returns the number removed.
    pub fn clear_punch_log(&self) -> AttendanceResult<usize> {
        let removed = self.db.write(|tx| queries::clear_punches(tx))?;
        tracing::warn!(removed, "Punch log cleared");
        Ok(removed)
    }

    /// Overwrite the holder information of a card
    pub fn update_card_info(&self, id: i64, update: CardUpdate) -> AttendanceResult<Card> {
        let now = (self.clock)();
        let update = CardUpdate {
            card_name: non_blank(update.card_name),
            user_fullname: non_blank(update.user_fullname),
            user_id: non_blank(update.user_id),
        };

        let card = self.db.write(|tx| {
            if !queries::update_card_info(tx, id, &update, now)? {
                return Ok(None);
            }
            queries::find_card(tx, id)
        })?;

        card.ok_or(AttendanceError::CardIdNotFound(id))
    }

    /// Delete a card together with its punches
    pub fn delete_card(&self, id: i64) -> AttendanceResult<()> {
        if !self.db.write(|tx| queries::delete_card(tx, id))? {
            return Err(AttendanceError::CardIdNotFound(id));
        }
        tracing::info!(card_id = id, "Card deleted");
        Ok(())
    }
}

/// Trim and lowercase a card number, rejecting anything but hex and colons
pub fn normalize_card_number(raw: &str) -> AttendanceResult<String> {
    let normalized = raw.trim().to_ascii_lowercase();
    let valid = !normalized.is_empty()
        && normalized
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == ':');
    if valid {
        Ok(normalized)
    } else {
        Err(AttendanceError::InvalidCardNumber(raw.to_string()))
    }
}

fn present(mut card: Card, now: i64) -> Card {
    card.is_present = true;
    card.updated_at = now;
    card
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn log_scan(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::UnknownCard { card_number } => {
            tracing::info!(card_number = %card_number, "Scan of unregistered card")
        }
        ScanOutcome::Debounced { card } => {
            tracing::debug!(card_number = %card.card_number, "Repeated scan ignored")
        }
        ScanOutcome::AlreadyIn { card } => {
            tracing::debug!(card_number = %card.card_number, "Card already punched in")
        }
        ScanOutcome::PunchedIn { card, .. } => {
            tracing::info!(card_number = %card.card_number, "Punch in registered")
        }
        ScanOutcome::LeaveRecorded { card, punch } => {
            tracing::info!(card_number = %card.card_number, leave = %punch.status, "Leave scan registered")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    const UID: [u8; 4] = [0xAB, 0xBA, 0xDE, 0xDA];

    fn service() -> (AttendanceService, Arc<AtomicI64>) {
        let now = Arc::new(AtomicI64::new(1_000_000));
        let clock = Arc::clone(&now);
        let db = Arc::new(Database::open_in_memory().unwrap());
        let service = AttendanceService::new(db, AttendanceConfig::default())
            .with_clock(move || clock.load(Ordering::SeqCst));
        (service, now)
    }

    fn advance(now: &AtomicI64, ms: i64) {
        now.fetch_add(ms, Ordering::SeqCst);
    }

    #[test]
    fn test_unknown_card_scan_writes_nothing() {
        let (service, _) = service();
        let outcome = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::UnknownCard {
                card_number: "ab:ba:de:da".to_string()
            }
        );
        assert!(service.overview().unwrap().is_empty());
        assert!(service.punch_log().unwrap().is_empty());
    }

    #[test]
    fn test_arrival_scan_punches_in_once() {
        let (service, now) = service();
        service.find_or_create_card("ab:ba:de:da").unwrap();

        let first = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(first, ScanOutcome::PunchedIn { ref card, .. } if card.is_present));

        advance(&now, 500);
        let repeated = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(repeated, ScanOutcome::Debounced { .. }));

        advance(&now, 5_000);
        let later = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(later, ScanOutcome::AlreadyIn { .. }));

        assert_eq!(service.punch_log().unwrap().len(), 1);
    }

    #[test]
    fn test_debounce_window_is_under_two_seconds() {
        let (service, now) = service();
        service.find_or_create_card("ab:ba:de:da").unwrap();
        service.scan(&UID, ScanMode::Leave(None)).unwrap();

        advance(&now, 1_999);
        let within = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(within, ScanOutcome::Debounced { .. }));

        advance(&now, 1);
        let after = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(after, ScanOutcome::PunchedIn { .. }));
    }

    #[test]
    fn test_leave_scan_uses_unknown_kind() {
        let (service, _) = service();
        service.find_or_create_card("ab:ba:de:da").unwrap();

        let outcome = service.scan(&UID, ScanMode::Leave(None)).unwrap();
        match outcome {
            ScanOutcome::LeaveRecorded { punch, .. } => {
                assert_eq!(punch.status.as_str(), crate::storage::UNKNOWN_LEAVE)
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_arrival_after_punch_out() {
        let (service, now) = service();
        service.find_or_create_card("ab:ba:de:da").unwrap();
        service.scan(&UID, ScanMode::Arrival).unwrap();

        advance(&now, 60_000);
        let out = service.punch_out("AB:BA:DE:DA").unwrap();
        assert_eq!(out.status, PunchStatus::Out);
        assert!(!service.overview().unwrap()[0].is_present);

        advance(&now, 60_000);
        let again = service.scan(&UID, ScanMode::Arrival).unwrap();
        assert!(matches!(again, ScanOutcome::PunchedIn { .. }));
        assert!(service.overview().unwrap()[0].is_present);
    }

    #[test]
    fn test_find_or_create_is_idempotent() {
        let (service, _) = service();
        let first = service.find_or_create_card(" AB:CD ").unwrap();
        let second = service.find_or_create_card("ab:cd").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.card_number, "ab:cd");
        assert_eq!(service.overview().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_card_numbers() {
        let (service, _) = service();
        assert!(matches!(
            service.find_or_create_card(""),
            Err(AttendanceError::InvalidCardNumber(_))
        ));
        assert!(matches!(
            service.find_or_create_card("zz:zz"),
            Err(AttendanceError::InvalidCardNumber(_))
        ));
        assert!(matches!(
            service.scan(&[], ScanMode::Arrival),
            Err(AttendanceError::InvalidCardNumber(_))
        ));
    }

    #[test]
    fn test_register_leave_deduplicates() {
        let (service, now) = service();
        service.find_or_create_card("aa:bb").unwrap();

        let first = service.register_leave("aa:bb", Some("leave_type.sick")).unwrap();
        assert!(first.punch.is_some());
        assert!(first.card.is_present);

        advance(&now, 200);
        let duplicate = service.register_leave("aa:bb", Some("leave_type.sick")).unwrap();
        assert!(duplicate.punch.is_none());

        let other_kind = service.register_leave("aa:bb", Some("leave_type.doctor")).unwrap();
        assert!(other_kind.punch.is_some());

        assert_eq!(service.punch_log().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_card_operations_fail() {
        let (service, _) = service();
        assert!(matches!(
            service.register_leave("aa", None),
            Err(AttendanceError::CardNotFound(_))
        ));
        assert!(matches!(
            service.punch_out("aa"),
            Err(AttendanceError::CardNotFound(_))
        ));
        assert!(matches!(
            service.delete_card(7),
            Err(AttendanceError::CardIdNotFound(7))
        ));
        assert!(matches!(
            service.update_card_info(7, CardUpdate::default()),
            Err(AttendanceError::CardIdNotFound(7))
        ));
    }

    #[test]
    fn test_update_card_info_blanks_become_none() {
        let (service, _) = service();
        let card = service.find_or_create_card("aa").unwrap();

        let updated = service
            .update_card_info(
                card.id,
                CardUpdate {
                    card_name: Some("  ".to_string()),
                    user_fullname: Some(" Ana Novak ".to_string()),
                    user_id: None,
                },
            )
            .unwrap();

        assert_eq!(updated.card_name, None);
        assert_eq!(updated.user_fullname.as_deref(), Some("Ana Novak"));
    }

    #[test]
    fn test_delete_and_clear() {
        let (service, now) = service();
        let card = service.find_or_create_card("ab:ba:de:da").unwrap();
        service.scan(&UID, ScanMode::Arrival).unwrap();
        advance(&now, 10_000);
        service.punch_out("ab:ba:de:da").unwrap();

        assert_eq!(service.clear_punch_log().unwrap(), 2);
        assert_eq!(service.overview().unwrap().len(), 1);

        service.delete_card(card.id).unwrap();
        assert!(service.overview().unwrap().is_empty());
    }
}
