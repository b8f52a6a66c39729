//! Prompt contract for pick extraction
//!
//! The model must answer with exactly one JSON object holding the keys in
//! [`REPLY_KEYS`]. Everything else about the wording is a fixed template.

/// Keys the reply object must carry, case-sensitive
pub const REPLY_KEYS: [&str; 4] = ["Pick", "Odds", "Sport", "Unit"];

/// Build the single user-role prompt for one comment
pub fn build_pick_prompt(comment: &str) -> String {
    format!(
        r#"Goal
Extract structured betting information from the betting comment below. Key details, including odds and units, must stay linked to the pick they belong to. Focus on "Today's Pick" or the most explicitly stated current bet and ignore past results and filler text.

Return
Exactly one JSON object with these fields:
  Pick: the primary betting selection (required).
  Odds: the odds attached to that pick (required).
  Sport: the sport or league, e.g. NFL, NBA (required).
  Unit: the stake or risked amount in units (required).

Rules
- If several picks appear, extract only "Today's Pick" or the most definitive bet.
- Make sure the odds belong to the extracted pick.
- Picks may be phrased informally or decorated with emoji; extract the most explicit bet.
- Ignore past bets such as "Last Pick", "POTD Record" or "Previous pick".
- If a field is missing, use "N/A".

Examples of how picks appear
  "POTD: O31.5 Rush Yards - Tyler Huntley (-110 FanDuel; Risking 2.2u to win 2u)"
  "🔥 Best Bet: Both Teams 2+ Cards - NO"
  "🚀 Lock: City over 3.5 goals"
  "Pick: Josh Allen over 231.5 passing yards -120 (DraftKings)"
  "Today's Pick: Tallon Griekspoor vs Carlos Alcaraz | Griekspoor +5.5 games at -140. 2 units."

### Betting Comment:
{comment}

Respond with the JSON object only."#
    )
}
