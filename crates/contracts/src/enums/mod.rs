pub mod writeoff_reason;
