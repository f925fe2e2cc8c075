/// quick start - minimal example to get started
use lendtrack_rs::{LoanBook, LoanDirection, LoanTerms, LoanView, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut book = LoanBook::with_system_time();
    let today = book.today();

    // lend 10,000 at 8% simple interest for a year
    let id = book.add_loan(LoanTerms::simple(
        "Rahul Kumar",
        LoanDirection::Lent,
        Money::from_major(10_000),
        Rate::from_percentage(8),
        today,
        12,
    ));

    // record a repayment
    book.record_payment_now(id, Money::from_major(500), Some("first instalment".into()))?;

    // print current state
    if let Some(loan) = book.get(id) {
        println!("{}", LoanView::from_loan(loan, today)?.to_json_pretty()?);
    }

    Ok(())
}
