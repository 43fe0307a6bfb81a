#[macro_export]
macro_rules! state {
    // $acct_ty is the AccountType enum, $data_ty is the record struct
    ($acct_ty:ident, $data_ty:ident) => {
        impl $data_ty {
            /// 8 bytes for the discriminator + the POD struct size
            pub const fn get_size() -> usize {
                8 + core::mem::size_of::<Self>()
            }

            /// Immutably unpack from raw account data
            pub fn unpack(data: &[u8]) -> Result<&Self, ProgramError> {
                if data.len() < Self::get_size() {
                    return Err(ProgramError::AccountDataTooSmall);
                }
                Self::try_from_bytes(&data[..Self::get_size()])
            }

            /// Mutably unpack from raw account data
            pub fn unpack_mut(data: &mut [u8]) -> Result<&mut Self, ProgramError> {
                if data.len() < Self::get_size() {
                    return Err(ProgramError::AccountDataTooSmall);
                }
                Self::try_from_bytes_mut(&mut data[..Self::get_size()])
            }

            /// Copy out of account data that may not be aligned (e.g. instruction data)
            pub fn unpack_unaligned(data: &[u8]) -> Result<Self, ProgramError> {
                if data.len() != Self::get_size() {
                    return Err(ProgramError::InvalidAccountData);
                }
                if data[0] != $acct_ty::$data_ty as u8 {
                    return Err(ProgramError::InvalidAccountData);
                }
                Ok(bytemuck::pod_read_unaligned::<Self>(&data[8..]))
            }

            /// Full account data (discriminator + body), as stored on chain
            pub fn pack(&self) -> Vec<u8> {
                let mut data = vec![0u8; Self::get_size()];
                data[0] = $acct_ty::$data_ty as u8;
                data[8..].copy_from_slice(bytemuck::bytes_of(self));
                data
            }
        }

        // steel account macro
        account!($acct_ty, $data_ty);
    };
}

#[macro_export]
macro_rules! event {
    ($discriminator_name:ident, $struct_name:ident) => {
        impl $struct_name {
            const DISCRIMINATOR_SIZE: usize = 8;

            pub fn size_of() -> usize {
                core::mem::size_of::<Self>() + Self::DISCRIMINATOR_SIZE
            }

            pub fn to_bytes(&self) -> Vec<u8> {
                let mut discriminator = [0u8; 8];
                discriminator[0] = $discriminator_name::$struct_name as u8;
                [
                    discriminator.to_vec(),
                    bytemuck::bytes_of(self).to_vec(),
                ]
                .concat()
            }

            /// Decode an event from log data, which carries no alignment guarantee
            pub fn from_log_data(data: &[u8]) -> Result<Self, ProgramError> {
                if data.len() < Self::size_of() {
                    return Err(ProgramError::InvalidAccountData);
                }
                if data[0] != $discriminator_name::$struct_name as u8 {
                    return Err(ProgramError::InvalidAccountData);
                }
                Ok(bytemuck::pod_read_unaligned::<Self>(
                    &data[Self::DISCRIMINATOR_SIZE..Self::size_of()],
                ))
            }

            pub fn log(&self) {
                solana_program::log::sol_log_data(&[&self.to_bytes()]);
            }
        }
    };
}
