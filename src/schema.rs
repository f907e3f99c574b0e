table! {
    appointments (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        phone -> Varchar,
        service -> Varchar,
        appointment_date -> Varchar,
        created_at -> Datetime,
    }
}
