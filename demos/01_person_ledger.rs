/// person ledger - net positions per counterparty as time passes
use chrono::{Duration, TimeZone, Utc};
use lendtrack_rs::{
    CompoundingFrequency, LoanBook, LoanDirection, LoanTerms, Money, Rate, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== person ledger ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let mut book = LoanBook::new(time);
    let start = book.today();

    book.add_loan(LoanTerms::simple(
        "Asha",
        LoanDirection::Lent,
        Money::from_major(1_000),
        Rate::from_percentage(6),
        start,
        6,
    ));
    book.add_loan(LoanTerms::simple(
        "Asha",
        LoanDirection::Borrowed,
        Money::from_major(400),
        Rate::ZERO,
        start,
        3,
    ));
    let priya = book.add_loan(LoanTerms::compound(
        "Priya Sharma",
        LoanDirection::Borrowed,
        Money::from_major(25_000),
        Rate::from_percentage(8),
        CompoundingFrequency::Monthly,
        start,
        12,
    ));

    for month in 0..4 {
        let today = book.today();
        println!("month {} ({})", month, today);
        println!("------------------");
        for summary in book.person_summaries(today)? {
            println!(
                "  {:<14} {:>10} {}",
                summary.person_name,
                summary.net_outstanding.round_dp(2),
                summary.net_position
            );
        }
        println!();

        if let Some(controller) = book.time().test_control() {
            controller.advance(Duration::days(30));
        }
        book.record_payment_now(priya, Money::from_major(2_000), None)?;
    }

    let dashboard = book.dashboard(book.today())?;
    println!("total lent:       {}", dashboard.total_lent);
    println!("total borrowed:   {}", dashboard.total_borrowed);
    println!("expected returns: {}", dashboard.expected_returns.round_dp(2));

    for event in book.events.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
