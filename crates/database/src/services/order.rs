use super::{ServiceError, ServiceResult};
use crate::entities::{cinema_hall, movie, movie_session, order, ticket};
use chrono::Utc;
use log::info;
use models::{
    UserContext, ValidationError,
    catalog::HallLayout,
    order::{NewTicket, OrderInput},
    pagination::{PageInfo, PageRequest},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

/// A ticket with the session, movie and hall it was sold for
#[derive(Debug, Clone, PartialEq)]
pub struct TicketWithSession {
    pub ticket: ticket::Model,
    pub session: movie_session::Model,
    pub movie: movie::Model,
    pub cinema_hall: cinema_hall::Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithTickets {
    pub order: order::Model,
    pub tickets: Vec<TicketWithSession>,
}

pub struct OrderService;

impl OrderService {
    /// List the user's orders, newest first
    pub async fn list(
        db: &DatabaseConnection,
        user: &UserContext,
        page: PageRequest,
    ) -> ServiceResult<(Vec<OrderWithTickets>, PageInfo)> {
        let paginator = Self::owned_by(user)
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .paginate(db, page.page_size);

        let total_items = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.index()).await?; // SeaORM uses 0-based pages

        let orders = Self::load_tickets(db, orders).await?;
        Ok((orders, PageInfo::new(page, total_items)))
    }

    /// Orders of other users are reported as missing
    pub async fn retrieve(
        db: &DatabaseConnection,
        user: &UserContext,
        id: i32,
    ) -> ServiceResult<OrderWithTickets> {
        let order = Self::find_owned(db, user, id).await?;

        Self::load_tickets(db, vec![order])
            .await?
            .pop()
            .ok_or(ServiceError::not_found("order", id))
    }

    /// Creates the order and all of its tickets, or nothing at all
    pub async fn create(
        db: &DatabaseConnection,
        user: &UserContext,
        input: OrderInput,
    ) -> ServiceResult<OrderWithTickets> {
        Self::check_payload(&input)?;

        let txn = db.begin().await?;
        let order = order::ActiveModel {
            user_id: Set(user.subject.clone()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::insert_tickets(&txn, order.id, &input.tickets).await?;
        txn.commit().await?;

        info!(
            "Created order {} with {} tickets for {}",
            order.id,
            input.tickets.len(),
            user.subject
        );
        Self::retrieve(db, user, order.id).await
    }

    /// Replaces the order's tickets. Seats held by the order itself may be
    /// requested again.
    pub async fn update(
        db: &DatabaseConnection,
        user: &UserContext,
        id: i32,
        input: OrderInput,
    ) -> ServiceResult<OrderWithTickets> {
        Self::check_payload(&input)?;

        let txn = db.begin().await?;
        let order = Self::find_owned(&txn, user, id).await?;

        ticket::Entity::delete_many()
            .filter(ticket::Column::OrderId.eq(order.id))
            .exec(&txn)
            .await?;
        Self::insert_tickets(&txn, order.id, &input.tickets).await?;
        txn.commit().await?;

        info!("Replaced tickets of order {id}");
        Self::retrieve(db, user, id).await
    }

    pub async fn delete(db: &DatabaseConnection, user: &UserContext, id: i32) -> ServiceResult<()> {
        let txn = db.begin().await?;
        let order = Self::find_owned(&txn, user, id).await?;

        ticket::Entity::delete_many()
            .filter(ticket::Column::OrderId.eq(order.id))
            .exec(&txn)
            .await?;
        order::Entity::delete_by_id(order.id).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted order {id}");
        Ok(())
    }

    fn owned_by(user: &UserContext) -> sea_orm::Select<order::Entity> {
        order::Entity::find().filter(order::Column::UserId.eq(user.subject.as_str()))
    }

    async fn find_owned<C: ConnectionTrait>(
        db: &C,
        user: &UserContext,
        id: i32,
    ) -> ServiceResult<order::Model> {
        Self::owned_by(user)
            .filter(order::Column::Id.eq(id))
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("order", id))
    }

    fn check_payload(input: &OrderInput) -> ServiceResult<()> {
        input.validate()?;

        if let Some(ticket) = input.first_duplicate() {
            return Err(ServiceError::Conflict(format!(
                "seat {} in row {} of movie session {} is requested twice",
                ticket.seat, ticket.row, ticket.movie_session
            )));
        }

        Ok(())
    }

    /// Validates the seats against their halls and the seats already sold,
    /// then inserts them. Must run inside the order's transaction.
    async fn insert_tickets(
        txn: &DatabaseTransaction,
        order_id: i32,
        tickets: &[NewTicket],
    ) -> ServiceResult<()> {
        let session_ids: HashSet<i32> = tickets.iter().map(|t| t.movie_session).collect();

        let layouts: HashMap<i32, HallLayout> = movie_session::Entity::find()
            .filter(movie_session::Column::Id.is_in(session_ids))
            .find_also_related(cinema_hall::Entity)
            .all(txn)
            .await?
            .into_iter()
            .filter_map(|(session, hall)| hall.map(|hall| (session.id, hall.layout())))
            .collect();

        for ticket in tickets {
            let layout = layouts.get(&ticket.movie_session).ok_or_else(|| {
                ValidationError::new(
                    "tickets",
                    format!("no movie session with id {}", ticket.movie_session),
                )
            })?;

            if !layout.contains(ticket.row, ticket.seat) {
                return Err(ValidationError::new(
                    "tickets",
                    format!(
                        "row {} seat {} is outside the hall (rows 1..={}, seats 1..={})",
                        ticket.row, ticket.seat, layout.rows, layout.seats_in_row
                    ),
                )
                .into());
            }
        }

        let requested = tickets.iter().fold(Condition::any(), |condition, t| {
            condition.add(
                Condition::all()
                    .add(ticket::Column::MovieSessionId.eq(t.movie_session))
                    .add(ticket::Column::Row.eq(t.row))
                    .add(ticket::Column::Seat.eq(t.seat)),
            )
        });

        if let Some(taken) = ticket::Entity::find().filter(requested).one(txn).await? {
            return Err(ServiceError::Conflict(format!(
                "seat {} in row {} of movie session {} is already taken",
                taken.seat, taken.row, taken.movie_session_id
            )));
        }

        // The unique index still guards against a concurrent order for the same seat
        ticket::Entity::insert_many(tickets.iter().map(|t| ticket::ActiveModel {
            movie_session_id: Set(t.movie_session),
            order_id: Set(order_id),
            row: Set(t.row),
            seat: Set(t.seat),
            ..Default::default()
        }))
        .exec_without_returning(txn)
        .await
        .map_err(|e| {
            ServiceError::from_write(e, || {
                "one of the requested seats was taken by another order".to_string()
            })
        })?;

        Ok(())
    }

    /// Batch load tickets with their sessions, movies and halls
    async fn load_tickets<C: ConnectionTrait>(
        db: &C,
        orders: Vec<order::Model>,
    ) -> Result<Vec<OrderWithTickets>, DbErr> {
        if orders.is_empty() {
            return Ok(vec![]);
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

        let tickets = ticket::Entity::find()
            .filter(ticket::Column::OrderId.is_in(order_ids))
            .order_by_asc(ticket::Column::MovieSessionId)
            .order_by_asc(ticket::Column::Row)
            .order_by_asc(ticket::Column::Seat)
            .all(db)
            .await?;

        let session_ids: HashSet<i32> = tickets.iter().map(|t| t.movie_session_id).collect();
        let sessions: HashMap<i32, movie_session::Model> = movie_session::Entity::find()
            .filter(movie_session::Column::Id.is_in(session_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let movie_ids: HashSet<i32> = sessions.values().map(|s| s.movie_id).collect();
        let movies: HashMap<i32, movie::Model> = movie::Entity::find()
            .filter(movie::Column::Id.is_in(movie_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let hall_ids: HashSet<i32> = sessions.values().map(|s| s.cinema_hall_id).collect();
        let halls: HashMap<i32, cinema_hall::Model> = cinema_hall::Entity::find()
            .filter(cinema_hall::Column::Id.is_in(hall_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|h| (h.id, h))
            .collect();

        let mut tickets_by_order: HashMap<i32, Vec<TicketWithSession>> = HashMap::new();
        for ticket in tickets {
            let Some(session) = sessions.get(&ticket.movie_session_id) else {
                continue;
            };
            let (Some(movie), Some(cinema_hall)) = (
                movies.get(&session.movie_id),
                halls.get(&session.cinema_hall_id),
            ) else {
                continue;
            };

            tickets_by_order
                .entry(ticket.order_id)
                .or_default()
                .push(TicketWithSession {
                    session: session.clone(),
                    movie: movie.clone(),
                    cinema_hall: cinema_hall.clone(),
                    ticket,
                });
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithTickets {
                tickets: tickets_by_order.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }
}
