pub mod session;

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{CustomerId, OrderId};
use crate::models::order::OrderStatus;
use crate::report::RunReport;
use crate::setup::{CUSTOMER_LOCATION, featured_item};
use crate::state::AppState;
use crate::system::ProcessOutcome;

pub use session::{Session, is_no, is_yes};

pub const SUPPORT_RESPONSE: &str = "We're investigating your concern!";

/// Drives one customer through ordering, delivery and an optional complaint.
pub async fn run<R, W>(state: &mut AppState, session: &mut Session<R, W>) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    session
        .say("Welcome to the Food Delivery Simulation")
        .await?;

    let name = session.prompt("Enter your name: ").await?;
    let customer_id = state.system.add_customer(name.clone(), CUSTOMER_LOCATION);

    session.say("\nAvailable Restaurants:").await?;
    let listing: Vec<String> = state
        .system
        .restaurants()
        .iter()
        .enumerate()
        .map(|(idx, restaurant)| format!("{}. {}", idx + 1, restaurant.name))
        .collect();
    for line in listing {
        session.say(line).await?;
    }

    let choice = session.prompt("\nEnter restaurant name: ").await?;
    let Some(restaurant) = state.system.find_restaurant(&choice) else {
        session.say("Invalid choice. Exiting...").await?;
        return Err(AppError::InvalidRestaurant(choice));
    };
    let restaurant_id = restaurant.id;
    let restaurant_name = restaurant.name.clone();
    let item = featured_item(&restaurant_name)
        .map(str::to_string)
        .or_else(|| restaurant.menu.keys().next().cloned());

    let priority = is_yes(&session.prompt("Is this a priority order? (yes/no): ").await?);

    state
        .system
        .place_order(customer_id, restaurant_id, item, priority)?;
    session
        .say(format!(
            "\n{name} placed an order at {restaurant_name}. Priority Order: {priority}"
        ))
        .await?;
    session
        .say(format!(
            "Order received at {restaurant_name}. Please wait while we process it..."
        ))
        .await?;

    let queued: Vec<OrderId> = state
        .system
        .restaurant(restaurant_id)?
        .received
        .iter()
        .copied()
        .filter(|id| {
            state
                .system
                .order(*id)
                .is_ok_and(|order| order.status == OrderStatus::Initiated)
        })
        .collect();

    for order_id in queued {
        pause(state.config.accept_delay, "restaurant deciding").await;
        let outcome = state.system.process_order(order_id)?;
        state
            .metrics
            .record_process(&outcome, state.system.pending_count());
        announce_outcome(state, session, &outcome).await?;
    }

    pause(state.config.delivery_delay, "drivers travelling").await;
    let deliveries = state.system.simulate_delivery()?;
    state.metrics.record_deliveries(&deliveries);
    for delivery in &deliveries {
        let agent = state.system.agent(delivery.agent_id)?;
        session
            .say(format!("Order Status Updated: {}", OrderStatus::Delivered))
            .await?;
        session
            .say(format!("Order successfully delivered by {}!", agent.name))
            .await?;
    }

    let satisfaction = session
        .prompt("\nWas your delivery satisfactory? (yes/no): ")
        .await?;
    if is_no(&satisfaction) {
        let complaint = session.prompt("Describe your issue: ").await?;
        file_complaint(state, session, customer_id, complaint).await?;
    }

    list_active_tickets(state, session).await?;

    if state.config.print_report {
        let report = RunReport::capture(state)
            .to_json()
            .map_err(|err| AppError::Internal(format!("failed to encode report: {err}")))?;
        session.say(report).await?;
    }

    if state.config.print_metrics {
        let metrics = state.metrics.encode().map_err(AppError::Internal)?;
        session.say(metrics).await?;
    }

    info!(orders = state.system.orders().len(), "session finished");
    Ok(())
}

async fn announce_outcome<R, W>(
    state: &AppState,
    session: &mut Session<R, W>,
    outcome: &ProcessOutcome,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match outcome {
        ProcessOutcome::Rejected { order_id } => {
            let order = state.system.order(*order_id)?;
            let restaurant = state.system.restaurant(order.restaurant)?;
            session
                .say(format!(
                    "\nSorry! {} couldn't accept this order at the moment.",
                    restaurant.name
                ))
                .await?;
        }
        ProcessOutcome::Accepted { order_id, pass } => {
            let order = state.system.order(*order_id)?;
            let restaurant = state.system.restaurant(order.restaurant)?;
            session
                .say(format!(
                    "\n{} has accepted the order! Preparing your food now...",
                    restaurant.name
                ))
                .await?;

            for assignment in &pass.assignments {
                let agent = state.system.agent(assignment.agent_id)?;
                let order = state.system.order(assignment.order_id)?;
                let pickup = state.system.restaurant(order.restaurant)?;
                session
                    .say(format!("Order Status Updated: {}", order.status))
                    .await?;
                session
                    .say(format!(
                        "{} is on the way to pick up your order from {}!",
                        agent.name, pickup.name
                    ))
                    .await?;
            }

            if pass.drivers_exhausted {
                session.say("No drivers available at the moment.").await?;
            }
        }
    }

    Ok(())
}

async fn file_complaint<R, W>(
    state: &mut AppState,
    session: &mut Session<R, W>,
    customer_id: CustomerId,
    complaint: String,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let customer = state.system.customer(customer_id)?;
    let Some(ticket_id) = state.support.submit_ticket(Some(customer), complaint.clone()) else {
        return Ok(());
    };
    state.metrics.record_ticket("submitted");
    session
        .say(format!(
            "\nTicket {ticket_id} submitted by {}: {complaint}",
            customer.name
        ))
        .await?;

    match state.support.respond_ticket(ticket_id, SUPPORT_RESPONSE) {
        Ok(_) => {
            state.metrics.record_ticket("responded");
            session
                .say(format!("Support Response to {ticket_id}: {SUPPORT_RESPONSE}"))
                .await?;
            pause(state.config.support_delay, "support investigating").await;
        }
        Err(AppError::TicketNotFound(id)) => {
            session.say(format!("Ticket {id} not found.")).await?;
        }
        Err(err) => return Err(err),
    }

    match state.support.resolve_ticket(ticket_id) {
        Ok(_) => {
            state.metrics.record_ticket("resolved");
            session
                .say(format!("Ticket {ticket_id} has been successfully resolved!"))
                .await?;
        }
        Err(AppError::TicketNotFound(id)) => {
            session.say(format!("Ticket {id} not found.")).await?;
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

async fn list_active_tickets<R, W>(
    state: &AppState,
    session: &mut Session<R, W>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if state.support.active_count() == 0 {
        return session.say("\nNo unresolved issues at the moment!").await;
    }

    session.say("\nActive Customer Complaints:").await?;
    for ticket in state.support.view_active_tickets() {
        session
            .say(format!("{}: {} - {}", ticket.id, ticket.customer, ticket.issue))
            .await?;
    }

    Ok(())
}

async fn pause(delay: Duration, reason: &str) {
    if delay.is_zero() {
        debug!(reason, "pause skipped");
        return;
    }

    debug!(reason, delay_ms = delay.as_millis() as u64, "pausing");
    tokio::time::sleep(delay).await;
}
