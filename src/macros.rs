/// Dispatch a generic async function over the record type behind a
/// `Resource` value.
///
/// ```ignore
/// with_resource!(resource, run_ls(criteria, page, limit))
/// ```
#[macro_export]
macro_rules! with_resource {
    ($resource:expr, $run:ident ( $($args:expr),* $(,)? )) => {
        match $resource {
            $crate::types::Resource::Patients => {
                $run::<$crate::entity::Patient>($($args),*).await
            }
            $crate::types::Resource::Doctors => {
                $run::<$crate::entity::Doctor>($($args),*).await
            }
            $crate::types::Resource::Appointments => {
                $run::<$crate::entity::Appointment>($($args),*).await
            }
            $crate::types::Resource::Invoices => {
                $run::<$crate::entity::Invoice>($($args),*).await
            }
            $crate::types::Resource::Payments => {
                $run::<$crate::entity::Payment>($($args),*).await
            }
            $crate::types::Resource::Users => {
                $run::<$crate::entity::StaffUser>($($args),*).await
            }
            $crate::types::Resource::Wards => {
                $run::<$crate::entity::WardAllocation>($($args),*).await
            }
            $crate::types::Resource::Audit => {
                $run::<$crate::entity::AuditEvent>($($args),*).await
            }
        }
    };
}
