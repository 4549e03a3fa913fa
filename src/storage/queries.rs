//! Card and punch queries
//!
//! Plain functions over a borrowed connection, so callers compose them inside
//! one [`Database::write`](crate::storage::Database::write) transaction.

use crate::storage::types::{Card, CardUpdate, Punch, PunchLogEntry, PunchStatus};
use crate::storage::StorageResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CARD_COLUMNS: &str =
    "id, card_number, card_name, user_fullname, user_id, is_present, created_at, updated_at";

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        card_number: row.get(1)?,
        card_name: row.get(2)?,
        user_fullname: row.get(3)?,
        user_id: row.get(4)?,
        is_present: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn punch_from_row(row: &Row<'_>) -> rusqlite::Result<Punch> {
    Ok(Punch {
        id: row.get(0)?,
        card_id: row.get(1)?,
        status: PunchStatus::from(row.get::<_, String>(2)?),
        timestamp: row.get(3)?,
    })
}

/// Find a card by its rendered reader UID
pub fn find_card_by_number(conn: &Connection, card_number: &str) -> StorageResult<Option<Card>> {
    let card = conn
        .query_row(
            &format!("SELECT {} FROM cards WHERE card_number = ?1", CARD_COLUMNS),
            params![card_number],
            card_from_row,
        )
        .optional()?;
    Ok(card)
}

/// Find a card by id
pub fn find_card(conn: &Connection, id: i64) -> StorageResult<Option<Card>> {
    let card = conn
        .query_row(
            &format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS),
            params![id],
            card_from_row,
        )
        .optional()?;
    Ok(card)
}

/// Register a new card with no holder information
pub fn insert_card(conn: &Connection, card_number: &str, now: i64) -> StorageResult<Card> {
    conn.execute(
        "INSERT INTO cards (card_number, is_present, created_at, updated_at)
         VALUES (?1, 0, ?2, ?2)",
        params![card_number, now],
    )?;

    Ok(Card {
        id: conn.last_insert_rowid(),
        card_number: card_number.to_string(),
        card_name: None,
        user_fullname: None,
        user_id: None,
        is_present: false,
        created_at: now,
        updated_at: now,
    })
}

/// All cards in registration order
pub fn list_cards(conn: &Connection) -> StorageResult<Vec<Card>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM cards ORDER BY id", CARD_COLUMNS))?;
    let cards = stmt
        .query_map([], card_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cards)
}

/// Overwrite holder information. Returns false when no such card exists.
pub fn update_card_info(
    conn: &Connection,
    id: i64,
    update: &CardUpdate,
    now: i64,
) -> StorageResult<bool> {
    let changed = conn.execute(
        "UPDATE cards SET card_name = ?1, user_fullname = ?2, user_id = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            update.card_name,
            update.user_fullname,
            update.user_id,
            now,
            id
        ],
    )?;
    Ok(changed > 0)
}

/// Set the presence flag of a card
pub fn set_presence(conn: &Connection, id: i64, present: bool, now: i64) -> StorageResult<()> {
    conn.execute(
        "UPDATE cards SET is_present = ?1, updated_at = ?2 WHERE id = ?3",
        params![present, now, id],
    )?;
    Ok(())
}

/// Delete a card and its punches. Returns false when no such card exists.
pub fn delete_card(conn: &Connection, id: i64) -> StorageResult<bool> {
    conn.execute("DELETE FROM punches WHERE card_id = ?1", params![id])?;
    let deleted = conn.execute("DELETE FROM cards WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Most recent punch of a card
pub fn last_punch(conn: &Connection, card_id: i64) -> StorageResult<Option<Punch>> {
    let punch = conn
        .query_row(
            "SELECT id, card_id, status, timestamp FROM punches
             WHERE card_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT 1",
            params![card_id],
            punch_from_row,
        )
        .optional()?;
    Ok(punch)
}

/// Record a punch
pub fn insert_punch(
    conn: &Connection,
    card_id: i64,
    status: &PunchStatus,
    timestamp: i64,
) -> StorageResult<Punch> {
    conn.execute(
        "INSERT INTO punches (card_id, status, timestamp) VALUES (?1, ?2, ?3)",
        params![card_id, status.as_str(), timestamp],
    )?;

    Ok(Punch {
        id: conn.last_insert_rowid(),
        card_id,
        status: status.clone(),
        timestamp,
    })
}

/// All punches joined with their cards, newest first
pub fn punch_log(conn: &Connection) -> StorageResult<Vec<PunchLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, c.card_number, c.card_name, c.user_fullname, p.status, p.timestamp
         FROM punches p
         INNER JOIN cards c ON c.id = p.card_id
         ORDER BY p.timestamp DESC, p.id DESC",
    )?;

    let entries = stmt
        .query_map([], |row| {
            Ok(PunchLogEntry {
                id: row.get(0)?,
                card_number: row.get(1)?,
                card_name: row.get(2)?,
                user_fullname: row.get(3)?,
                status: PunchStatus::from(row.get::<_, String>(4)?),
                timestamp: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Remove every punch. Returns the number removed.
pub fn clear_punches(conn: &Connection) -> StorageResult<usize> {
    Ok(conn.execute("DELETE FROM punches", [])?)
}
