//! Interactive numbered menu shared by the client and the server-local CLI.
//!
//! # Responsibility
//! - Render the 1-5 menu and dispatch the chosen action to a `MenuBackend`.
//! - Parse prompted fields strictly and report bad input to the user.
//! - Render listed records in one fixed line format.
//!
//! # Invariants
//! - Input that fails to parse never reaches the backend.
//! - Backend failures are printed and the loop continues.
//! - End of input behaves like choosing "Exit".

mod input;

pub use input::{InputError, MenuChoice};

use crate::model::medicine::{Medicine, MedicineId};
use input::{parse_field, parse_price, prompt, ConsoleError, ConsoleResult};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const MENU_TEXT: &str = "Choose operation:
1. Insert data
2. Update data
3. Delete data
4. Show All data
5. Exit";

/// Store operations reachable from the menu.
///
/// Implemented by the HTTP client and by the server's store handle.
pub trait MenuBackend {
    type Error: Display;

    fn insert(&self, medicine: &Medicine) -> Result<(), Self::Error>;
    fn update(&self, medicine: &Medicine) -> Result<(), Self::Error>;
    fn delete(&self, id: MedicineId) -> Result<(), Self::Error>;
    fn list(&self) -> Result<Vec<Medicine>, Self::Error>;
}

/// Menu loop bound to one backend.
pub struct Menu<B: MenuBackend> {
    backend: B,
    require_positive_delete_id: bool,
    list_banner: Option<&'static str>,
}

impl<B: MenuBackend> Menu<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            require_positive_delete_id: false,
            list_banner: None,
        }
    }

    /// Rejects delete ids `<= 0` before they reach the backend.
    pub fn require_positive_delete_id(mut self, enabled: bool) -> Self {
        self.require_positive_delete_id = enabled;
        self
    }

    /// Line printed before every "Show all" request.
    pub fn list_banner(mut self, banner: &'static str) -> Self {
        self.list_banner = Some(banner);
        self
    }

    /// Runs the menu until "Exit" is chosen or `input` is exhausted.
    ///
    /// # Errors
    /// - Returns an error only when reading `input` or writing `output` fails.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> io::Result<()> {
        loop {
            writeln!(output, "{MENU_TEXT}")?;
            let Some(choice) = prompt(input, output, "Enter choice: ")? else {
                writeln!(output, "Exiting...")?;
                return Ok(());
            };

            let result = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Insert) => self.insert(input, output),
                Some(MenuChoice::Update) => self.update(input, output),
                Some(MenuChoice::Delete) => self.delete(input, output),
                Some(MenuChoice::ShowAll) => self.show_all(output),
                Some(MenuChoice::Exit) => {
                    writeln!(output, "Exiting...")?;
                    return Ok(());
                }
                None => {
                    writeln!(output, "Invalid choice.")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) | Err(ConsoleError::Closed) => {}
                Err(ConsoleError::Input(err)) => writeln!(output, "{err}")?,
                Err(ConsoleError::Io(err)) => return Err(err),
            }
        }
    }

    fn insert<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> ConsoleResult<()> {
        writeln!(output, "Enter data to insert:")?;
        let medicine = read_medicine(input, output, 0)?;

        match self.backend.insert(&medicine) {
            Ok(()) => writeln!(output, "Data inserted successfully.")?,
            Err(err) => writeln!(output, "Error inserting data: {err}")?,
        }
        Ok(())
    }

    fn update<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> ConsoleResult<()> {
        writeln!(output, "Enter ID of data to update:")?;
        let id = read_id(input, output)?;
        writeln!(output, "Enter new data:")?;
        let medicine = read_medicine(input, output, id)?;

        match self.backend.update(&medicine) {
            Ok(()) => writeln!(output, "Data updated successfully.")?,
            Err(err) => writeln!(output, "Error updating data: {err}")?,
        }
        Ok(())
    }

    fn delete<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> ConsoleResult<()> {
        writeln!(output, "Enter ID of data to delete:")?;
        let id = read_id(input, output)?;
        if self.require_positive_delete_id && id <= 0 {
            return Err(InputError::NonPositiveId(id).into());
        }

        match self.backend.delete(id) {
            Ok(()) => writeln!(output, "Data deleted successfully.")?,
            Err(err) => writeln!(output, "Error deleting data: {err}")?,
        }
        Ok(())
    }

    fn show_all<W: Write>(&self, output: &mut W) -> ConsoleResult<()> {
        if let Some(banner) = self.list_banner {
            writeln!(output, "{banner}")?;
        }

        match self.backend.list() {
            Ok(medicines) => {
                writeln!(output, "Data received from server:\n")?;
                for medicine in &medicines {
                    writeln!(output, "{}", render_medicine(medicine))?;
                }
                writeln!(output)?;
            }
            Err(err) => writeln!(output, "Error fetching data: {err}")?,
        }
        Ok(())
    }
}

/// Formats one record as a single listing line.
pub fn render_medicine(medicine: &Medicine) -> String {
    format!(
        "ID: {}, Name: {}, Quantity: {}, Price: {:.2}",
        medicine.id, medicine.name, medicine.quantity, medicine.price
    )
}

fn read_medicine<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    id: MedicineId,
) -> ConsoleResult<Medicine> {
    let name = prompt(input, output, "Name: ")?.ok_or(ConsoleError::Closed)?;
    let quantity = prompt(input, output, "Quantity: ")?.ok_or(ConsoleError::Closed)?;
    let quantity = parse_field("quantity", &quantity)?;
    let price = prompt(input, output, "Price: ")?.ok_or(ConsoleError::Closed)?;
    let price = parse_price(&price)?;

    Ok(Medicine::with_id(id, name, quantity, price))
}

fn read_id<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> ConsoleResult<MedicineId> {
    let raw = prompt(input, output, "ID: ")?.ok_or(ConsoleError::Closed)?;
    Ok(parse_field("id", &raw)?)
}

#[cfg(test)]
mod tests {
    use super::{render_medicine, Menu, MenuBackend};
    use crate::model::medicine::{Medicine, MedicineId};
    use std::cell::RefCell;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingBackend {
        calls: RefCell<Vec<String>>,
        rows: Vec<Medicine>,
        fail: bool,
    }

    impl RecordingBackend {
        fn outcome(&self, call: String) -> Result<(), String> {
            self.calls.borrow_mut().push(call);
            if self.fail {
                Err("connection refused".to_string())
            } else {
                Ok(())
            }
        }
    }

    impl MenuBackend for &RecordingBackend {
        type Error = String;

        fn insert(&self, medicine: &Medicine) -> Result<(), String> {
            self.outcome(format!(
                "insert {} {} {}",
                medicine.name, medicine.quantity, medicine.price
            ))
        }

        fn update(&self, medicine: &Medicine) -> Result<(), String> {
            self.outcome(format!(
                "update {} {} {} {}",
                medicine.id, medicine.name, medicine.quantity, medicine.price
            ))
        }

        fn delete(&self, id: MedicineId) -> Result<(), String> {
            self.outcome(format!("delete {id}"))
        }

        fn list(&self) -> Result<Vec<Medicine>, String> {
            self.outcome("list".to_string())?;
            Ok(self.rows.clone())
        }
    }

    fn run_menu(menu: &Menu<&RecordingBackend>, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        menu.run(&mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn insert_update_delete_reach_backend_with_parsed_fields() {
        let backend = RecordingBackend::default();
        let menu = Menu::new(&backend);

        let output = run_menu(&menu, "1\naspirin\n10\n2.5\n2\n7\nparacetamol\n3\n1.25\n3\n7\n5\n");

        assert_eq!(
            *backend.calls.borrow(),
            vec![
                "insert aspirin 10 2.5".to_string(),
                "update 7 paracetamol 3 1.25".to_string(),
                "delete 7".to_string(),
            ]
        );
        assert!(output.contains("Data inserted successfully."));
        assert!(output.contains("Data updated successfully."));
        assert!(output.contains("Data deleted successfully."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn non_numeric_quantity_is_reported_and_not_sent() {
        let backend = RecordingBackend::default();
        let menu = Menu::new(&backend);

        let output = run_menu(&menu, "1\naspirin\nten\n2.5\n5\n");

        assert!(backend.calls.borrow().is_empty());
        assert!(output.contains("invalid quantity `ten`"));
    }

    #[test]
    fn infinite_price_is_reported_and_not_sent() {
        let backend = RecordingBackend::default();
        let menu = Menu::new(&backend);

        let output = run_menu(&menu, "1
morphine
1
inf
5
");

        assert!(backend.calls.borrow().is_empty());
        assert!(output.contains("invalid price `inf`"));
        assert!(!output.contains("Data inserted successfully."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn non_positive_delete_id_is_rejected_when_required() {
        let backend = RecordingBackend::default();
        let menu = Menu::new(&backend).require_positive_delete_id(true);

        let output = run_menu(&menu, "3\n0\n5\n");

        assert!(backend.calls.borrow().is_empty());
        assert!(output.contains("Invalid ID. Please enter a positive integer."));
    }

    #[test]
    fn backend_errors_are_printed_and_loop_continues() {
        let backend = RecordingBackend {
            fail: true,
            ..RecordingBackend::default()
        };
        let menu = Menu::new(&backend);

        let output = run_menu(&menu, "3\n4\n9\n");

        assert!(output.contains("Error deleting data: connection refused"));
        assert!(output.contains("Invalid choice."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn show_all_renders_rows_after_banner() {
        let backend = RecordingBackend {
            rows: vec![Medicine::with_id(1, "aspirin", 10, 2.5)],
            ..RecordingBackend::default()
        };
        let menu = Menu::new(&backend).list_banner("Fetching all data from the server...");

        let output = run_menu(&menu, "4\n");

        let banner_at = output.find("Fetching all data").unwrap();
        let row_at = output
            .find("ID: 1, Name: aspirin, Quantity: 10, Price: 2.50")
            .unwrap();
        assert!(banner_at < row_at);
    }

    #[test]
    fn render_uses_two_decimal_price() {
        let line = render_medicine(&Medicine::with_id(3, "saline", -1, 0.126));
        assert_eq!(line, "ID: 3, Name: saline, Quantity: -1, Price: 0.13");
    }
}
