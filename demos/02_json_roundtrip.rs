/// json round trip - export a book and load it into another
use chrono::{TimeZone, Utc};
use lendtrack_rs::{
    LoanBook, LoanFilter, LoanTerms, Money, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json round trip ===\n");

    let opened = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut book = LoanBook::new(SafeTimeProvider::new(TimeSource::Test(opened)));

    let terms = LoanTerms::builder()
        .person_name("Meera")
        .contact_info("meera@example.com")
        .amount(Money::from_major(20_000))
        .borrowed()
        .rate(Rate::from_percentage(10))
        .start_date(book.today())
        .duration_months(12)
        .notes("laptop")
        .build()?;
    let id = book.add_loan(terms);
    book.record_payment_now(id, Money::from_major(1_500), None)?;

    let exported = book.export_json()?;
    println!("exported:");
    println!("---------");
    println!("{}\n", exported);

    let mut restored = LoanBook::new(SafeTimeProvider::new(TimeSource::Test(opened)));
    let count = restored.import_json(&exported)?;
    println!("imported {} loan(s)", count);

    for loan in restored.search("meera", LoanFilter::Borrowed) {
        println!("{} {} {}", loan.person_name(), loan.direction(), loan.principal());
    }

    // anything but an array is refused and leaves the book as it was
    if let Err(err) = restored.import_json(r#"{"loans": []}"#) {
        println!("rejected: {}", err);
    }
    println!("still holding {} loan(s)", restored.len());

    Ok(())
}
