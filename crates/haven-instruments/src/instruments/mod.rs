pub mod wellness_check;
