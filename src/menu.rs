// Interactive menu session
//
// Each transition returns the next `MenuState` or a `TaxError`. Recoverable
// errors are shown and the current menu is displayed again; anything else
// ends the session.

use crate::console::Console;
use crate::error::{RecordRef, TaxError};
use crate::models::{FuelType, NewProperty, NewVehicle};
use crate::report;
use crate::service;
use crate::store::RecordStore;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const PROMPT: &str = "Select an option: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Property,
    Vehicle,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    PropertyMenu,
    VehicleMenu,
    Summary,
    Exit,
}

impl MainAction {
    fn from_choice(choice: i64) -> Result<Self, TaxError> {
        match choice {
            1 => Ok(MainAction::PropertyMenu),
            2 => Ok(MainAction::VehicleMenu),
            3 => Ok(MainAction::Summary),
            4 => Ok(MainAction::Exit),
            other => Err(TaxError::InvalidChoice(other.to_string())),
        }
    }
}

/// Options shared by the property and vehicle submenus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordAction {
    Add,
    Calculate,
    List,
    Back,
}

impl RecordAction {
    fn from_choice(choice: i64) -> Result<Self, TaxError> {
        match choice {
            1 => Ok(RecordAction::Add),
            2 => Ok(RecordAction::Calculate),
            3 => Ok(RecordAction::List),
            4 => Ok(RecordAction::Back),
            other => Err(TaxError::InvalidChoice(other.to_string())),
        }
    }
}

pub struct Session<'a, S: RecordStore + ?Sized, R, W> {
    store: &'a mut S,
    console: Console<R, W>,
    state: MenuState,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: RecordStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut S, console: Console<R, W>) -> Self {
        Self {
            store,
            console,
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Drive the menus until Exit, end of input or a fatal error
    pub fn run(&mut self) -> Result<(), TaxError> {
        info!("Session started");
        while self.state != MenuState::Exited {
            match self.step() {
                Ok(next) => self.state = next,
                Err(TaxError::InputClosed) => {
                    info!("Input closed, ending session");
                    self.state = MenuState::Exited;
                }
                Err(e) if e.is_recoverable() => {
                    warn!(state = ?self.state, error = %e, "Recoverable error");
                    self.console.error(&e)?;
                }
                Err(e) => return Err(e),
            }
        }
        info!("Session ended");
        Ok(())
    }

    /// Show the current menu and perform one selected action
    pub fn step(&mut self) -> Result<MenuState, TaxError> {
        match self.state {
            MenuState::Main => self.main_menu(),
            MenuState::Property => self.property_menu(),
            MenuState::Vehicle => self.vehicle_menu(),
            MenuState::Exited => Ok(MenuState::Exited),
        }
    }

    fn header(&mut self, title: &str) -> Result<(), TaxError> {
        self.console.say("\n+-------------------------------------+")?;
        self.console.say(&format!("|   {:<34}|", title))?;
        self.console.say("+-------------------------------------+")
    }

    fn main_menu(&mut self) -> Result<MenuState, TaxError> {
        self.header("MAIN MENU")?;
        self.console.say("1. Property Tax Menu")?;
        self.console.say("2. Vehicle Tax Menu")?;
        self.console.say("3. Summary Report")?;
        self.console.say("4. Exit")?;

        let action = MainAction::from_choice(self.console.prompt_int(PROMPT)?)?;
        debug!(?action, "Main menu selection");

        match action {
            MainAction::PropertyMenu => Ok(MenuState::Property),
            MainAction::VehicleMenu => Ok(MenuState::Vehicle),
            MainAction::Summary => {
                let summary = service::summary(&*self.store)?;
                report::write_summary(self.console.out(), &summary)?;
                Ok(MenuState::Main)
            }
            MainAction::Exit => {
                self.console.say("Exiting the application. Thank you!")?;
                Ok(MenuState::Exited)
            }
        }
    }

    fn property_menu(&mut self) -> Result<MenuState, TaxError> {
        self.header("PROPERTY TAX MENU")?;
        self.console.say("1. Add Property Details")?;
        self.console.say("2. Calculate Property Tax")?;
        self.console.say("3. Display All Properties")?;
        self.console.say("4. Back to Main Menu")?;

        match RecordAction::from_choice(self.console.prompt_int(PROMPT)?)? {
            RecordAction::Add => {
                let property = NewProperty {
                    base_value: self.console.prompt_int("Enter Base Value: ")?,
                    built_up_area: self.console.prompt_int("Enter Built-Up Area: ")?,
                    age: self.console.prompt_int("Enter Age: ")?,
                    in_city: self.console.prompt_location("Is Located in City? (Y/N): ")?,
                };
                let id = self.store.add_property(property)?;
                info!(id, "Property added");
                self.console.success("Property added successfully!")?;
            }
            RecordAction::Calculate => {
                let id = self.console.prompt_int("Enter Property ID to calculate tax: ")?;
                service::calculate_property_tax(&mut *self.store, id)?;
                self.console.success("Property tax calculated successfully!")?;
            }
            RecordAction::List => {
                let properties = self.store.list_properties()?;
                report::write_property_table(self.console.out(), &properties)?;
            }
            RecordAction::Back => return Ok(MenuState::Main),
        }
        Ok(MenuState::Property)
    }

    fn vehicle_menu(&mut self) -> Result<MenuState, TaxError> {
        self.header("VEHICLE TAX MENU")?;
        self.console.say("1. Add Vehicle Details")?;
        self.console.say("2. Calculate Vehicle Tax")?;
        self.console.say("3. Display All Vehicles")?;
        self.console.say("4. Back to Main Menu")?;

        match RecordAction::from_choice(self.console.prompt_int(PROMPT)?)? {
            RecordAction::Add => {
                let vehicle = NewVehicle {
                    registration_number: self.console.prompt_int("Enter Registration Number: ")?,
                    brand: self.console.prompt("Enter Brand: ")?,
                    velocity: self.console.prompt_int("Enter Velocity: ")?,
                    seat_capacity: self.console.prompt_int("Enter Seat Capacity: ")?,
                };
                let key = self.store.add_vehicle(vehicle)?;
                info!(registration_number = key, "Vehicle added");
                self.console.success("Vehicle added successfully!")?;
            }
            RecordAction::Calculate => {
                let key = self
                    .console
                    .prompt_int("Enter Registration Number to calculate tax: ")?;
                // Fail before asking for fuel type and cost
                if self.store.get_vehicle(key)?.is_none() {
                    return Err(TaxError::NotFound(RecordRef::Vehicle(key)));
                }
                let code = self
                    .console
                    .prompt_int("Enter Type of Vehicle (1 - Petrol, 2 - Diesel, 3 - CNG): ")?;
                let cost = self.console.prompt_int("Enter Purchase Cost: ")?;

                service::calculate_vehicle_tax(&mut *self.store, key, FuelType::from_code(code), cost)?;
                self.console.success("Vehicle tax calculated successfully!")?;
            }
            RecordAction::List => {
                let vehicles = self.store.list_vehicles()?;
                report::write_vehicle_table(self.console.out(), &vehicles)?;
            }
            RecordAction::Back => return Ok(MenuState::Main),
        }
        Ok(MenuState::Vehicle)
    }
}
